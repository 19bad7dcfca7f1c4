//! LTL normalization over a shared formula DAG.
//!
//! Formulas are read from [`ltl::Expr`] with [`ingest`], rewritten by
//! [`normalize`] and written back with [`export`]. The result is equivalent
//! to the input over infinite words and has the normal form checked by
//! [`metrics::is_normalized`].
//!
//! ```
//! use ltlnorm::{ingest, normalize};
//!
//! let expr = ltl::parse("G (a | b U c)").unwrap();
//! let formula = normalize(ingest::from_expr(&expr.negation_normal_form()));
//! assert!(ltlnorm::metrics::is_normalized(&formula));
//! ```

mod construct;
pub mod error;
pub mod export;
pub mod formula;
pub mod ingest;
pub mod metrics;
pub mod normalize;

pub use error::IngestError;
pub use formula::{equal, release_static_nodes, Formula, Op};
pub use normalize::normalize;
