//! Per-construct backward state machines.
//!
//! One module per family: expression-shaped contexts (member access,
//! literal macros, replay helpers), definition contexts (define/type/
//! constant/constraint), and statement contexts (let/call/function
//! signature/preprocessor/fallback). Each machine is deliberately explicit;
//! the constructs are irregular enough that a unified backward grammar
//! would obscure more than it shares.

pub(crate) mod define;
pub(crate) mod expressions;
pub(crate) mod statements;
