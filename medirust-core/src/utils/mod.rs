// Helpers shared by unit tests, integration tests and the transforms crate's tests.
pub mod testing;
