pub use crate::{Element, Herald, Html, Node, PageShell, Signal, View, action, signal};
