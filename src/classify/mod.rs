// Text classification backends.

pub mod http;
pub mod traits;

pub use http::HttpClassifier;
pub use traits::{ClassifierSignal, NoopClassifier, TextClassifier, ToxicityPolicy};
