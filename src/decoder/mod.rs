mod edge;
mod router;
mod table;

pub use router::MessageRouter;
pub use table::Binding;

#[cfg(test)]
mod tests;
