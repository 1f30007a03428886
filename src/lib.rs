pub mod canvas;
pub mod cli;
pub mod components;
pub mod timelines;
pub mod toplevel;
