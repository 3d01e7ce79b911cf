pub mod backprop;

pub use backprop::{batch_gradient, compute_gradient, output_error, propagate_errors};
