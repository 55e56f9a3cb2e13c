//! `Instruction`: one opcode application within a [`crate::block::BasicBlock`]
//! (`spec.md` §4.5).

use std::collections::HashMap;
use std::fmt;

use crate::block::BlockId;
use crate::opcode::{Opcode, OpcodeFamily};
use crate::register::RegisterId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operand {
    Register(RegisterId),
    Immediate(i64),
    /// An absolute memory address, rendered in `Display` as uppercase hex
    /// (e.g. `$D020`), matching the machine's hardware-address convention.
    Address(u32),
    Block(BlockId),
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operand::Register(r) => write!(f, "r{}", r.0),
            Operand::Immediate(v) => write!(f, "{v}"),
            Operand::Address(a) => write!(f, "${a:04X}"),
            Operand::Block(b) => write!(f, "block{}", b.0),
        }
    }
}

/// The extra naming a `@map` instruction carries beyond its operands — a
/// struct/field pair for field-style `@map` declarations, or a range name
/// plus its address span for range-style ones (`spec.md` §4.5).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MapAccessInfo {
    Field { struct_name: String, field_name: String },
    Range { name: String, base_address: u32, end_address: u32 },
}

impl fmt::Display for MapAccessInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MapAccessInfo::Field { struct_name, field_name } => {
                write!(f, "{struct_name}.{field_name}")
            }
            MapAccessInfo::Range { name, base_address, end_address } => {
                write!(f, "{name}[${base_address:04X}..${end_address:04X}]")
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct Instruction {
    pub id: u32,
    pub opcode: Opcode,
    pub operands: Vec<Operand>,
    pub result: Option<RegisterId>,
    pub map_access: Option<MapAccessInfo>,
    pub metadata: HashMap<String, String>,
}

impl Instruction {
    pub fn new(id: u32, opcode: Opcode, operands: Vec<Operand>, result: Option<RegisterId>) -> Self {
        Instruction { id, opcode, operands, result, map_access: None, metadata: HashMap::new() }
    }

    pub fn with_map_access(mut self, info: MapAccessInfo) -> Self {
        self.map_access = Some(info);
        self
    }

    pub fn family(&self) -> OpcodeFamily {
        self.opcode.family()
    }

    pub fn has_side_effect(&self) -> bool {
        self.opcode.has_side_effect()
    }

    pub fn is_terminator(&self) -> bool {
        self.opcode.is_terminator()
    }

    pub fn get_operands(&self) -> &[Operand] {
        &self.operands
    }

    /// Every register this instruction reads — its operands, not its
    /// result — for liveness analyses built on top of this crate.
    pub fn get_used_registers(&self) -> Vec<RegisterId> {
        self.operands
            .iter()
            .filter_map(|op| match op {
                Operand::Register(r) => Some(*r),
                _ => None,
            })
            .collect()
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(result) = self.result {
            write!(f, "r{} = ", result.0)?;
        }
        write!(f, "{:?}", self.opcode)?;
        if let Some(map_access) = &self.map_access {
            write!(f, " {map_access}")?;
        }
        for operand in &self.operands {
            write!(f, " {operand}")?;
        }
        Ok(())
    }
}
