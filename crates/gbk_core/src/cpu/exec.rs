//! Execution routines referenced from the opcode tables.
//!
//! Every routine has the `ops::Execute` shape: it receives the opcode byte
//! (the second byte for CB-prefixed instructions) and decodes its register
//! fields from it. PC still points at the first byte of the instruction.

mod alu;
mod cb;
mod control;
mod incdec;
mod ld;
mod stack;
mod system;
