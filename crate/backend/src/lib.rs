pub mod c_emitter;
pub mod codegen;
pub mod ir_emitter;

pub use codegen::{CodegenOptions, Target, generate};
