// Passbook — Engine Module
//
// Name resolution and record mutation over any `AccountStore`.

pub mod mutation;
pub mod resolver;

pub use mutation::UpdateRequest;
pub use resolver::Headline;
