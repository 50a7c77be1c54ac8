//! Wire codecs for the IR.

pub mod json;
