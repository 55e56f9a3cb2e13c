//! # sfac_il
//!
//! The IL model (`spec.md` §4.5: [`ILModule`], [`ILFunction`],
//! [`BasicBlock`], [`Instruction`]) and the dominator/dominance-frontier
//! analyses built on top of it (`spec.md` §4.6: [`DominatorTree`],
//! [`DominanceFrontier`]).
//!
//! The IL *generator* that turns an `sfac_sema::AnalysisResult` into an
//! `ILModule` lives outside this crate family; this crate provides the
//! model and analyses such a generator would consume.

pub mod block;
pub mod codes;
pub mod dominator;
pub mod frontier;
pub mod function;
pub mod instruction;
pub mod module;
pub mod opcode;
pub mod register;

pub use block::{BasicBlock, BlockId};
pub use dominator::DominatorTree;
pub use frontier::DominanceFrontier;
pub use function::ILFunction;
pub use instruction::{Instruction, MapAccessInfo, Operand};
pub use module::{ExportSpec, ExportTarget, GlobalVariable, ILModule, ImportSpec, SymbolBinding};
pub use opcode::{Opcode, OpcodeFamily};
pub use register::{RegisterId, VirtualRegister};
