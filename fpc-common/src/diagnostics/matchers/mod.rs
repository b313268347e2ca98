//! Rule sets that select catalog entries from a deviation record
//!
//! `silver` and `bw` are first-match chains and yield at most one problem.
//! `developer`, `fixer` and `spread` are independent batteries; every check
//! that fires contributes its own problem. `drift` looks across a series of
//! B&W strips rather than a single one.

pub mod bw;
pub mod developer;
pub mod drift;
pub mod fixer;
pub mod silver;
pub mod spread;
