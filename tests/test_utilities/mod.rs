pub mod fake_tools;
pub mod mocks;
