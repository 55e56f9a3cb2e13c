//! `ILFunction`: one function's basic blocks and virtual-register pool
//! (`spec.md` §4.5).

use std::collections::HashMap;

use sfac_ast::Type;

use crate::block::{BasicBlock, BlockId};
use crate::register::{RegisterId, VirtualRegister};

pub struct ILFunction {
    pub name: String,
    pub params: Vec<(String, Type)>,
    pub return_type: Type,
    blocks: Vec<BasicBlock>,
    entry: BlockId,
    registers: Vec<VirtualRegister>,
    metadata: HashMap<String, String>,
}

impl ILFunction {
    /// Creates the function with its one entry block already present, per
    /// `spec.md` §4.5 ("a unique entry block created at construction").
    pub fn new(name: impl Into<String>, params: Vec<(String, Type)>, return_type: Type) -> Self {
        let entry = BlockId(0);
        ILFunction {
            name: name.into(),
            params,
            return_type,
            blocks: vec![BasicBlock::new(entry, "entry")],
            entry,
            registers: Vec::new(),
            metadata: HashMap::new(),
        }
    }

    pub fn entry_block(&self) -> BlockId {
        self.entry
    }

    pub fn create_block(&mut self, label: impl Into<String>) -> BlockId {
        let id = BlockId(self.blocks.len() as u32);
        self.blocks.push(BasicBlock::new(id, label));
        id
    }

    /// Hands out a fresh, never-reused register id — the "SSA-friendly
    /// identity" `spec.md` §4.5 asks for.
    pub fn create_register(&mut self, ty: Type, name: Option<String>) -> RegisterId {
        let id = RegisterId(self.registers.len() as u32);
        self.registers.push(VirtualRegister { id, ty, name });
        id
    }

    pub fn get_blocks(&self) -> &[BasicBlock] {
        &self.blocks
    }

    pub fn get_block_count(&self) -> usize {
        self.blocks.len()
    }

    pub fn block(&self, id: BlockId) -> &BasicBlock {
        &self.blocks[id.0 as usize]
    }

    pub fn block_mut(&mut self, id: BlockId) -> &mut BasicBlock {
        &mut self.blocks[id.0 as usize]
    }

    pub fn registers(&self) -> &[VirtualRegister] {
        &self.registers
    }

    pub fn metadata(&self) -> &HashMap<String, String> {
        &self.metadata
    }

    pub fn set_metadata(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.metadata.insert(key.into(), value.into());
    }

    /// Links `from -> to`, keeping both blocks' edge lists reciprocal.
    pub fn link(&mut self, from: BlockId, to: BlockId) {
        let (from_idx, to_idx) = (from.0 as usize, to.0 as usize);
        assert_ne!(from_idx, to_idx, "a block cannot link to itself via this helper; append a self-loop by id instead");
        if from_idx < to_idx {
            let (left, right) = self.blocks.split_at_mut(to_idx);
            left[from_idx].link_to(&mut right[0]);
        } else {
            let (left, right) = self.blocks.split_at_mut(from_idx);
            right[0].link_to(&mut left[to_idx]);
        }
    }
}
