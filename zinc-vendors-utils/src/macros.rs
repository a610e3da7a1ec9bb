#[macro_export]
macro_rules! selector {
    ($e: expr) => {{
        use $crate::macros::reexport::{Lazy, Selector};
        static SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse($e).unwrap());
        &*SELECTOR
    }};
}

#[doc(hidden)]
pub mod reexport {
    pub use once_cell::sync::Lazy;
    pub use scraper::Selector;
}
