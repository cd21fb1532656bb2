//! Crate-level tests: the public API driven end to end with the mock
//! binding, the way an embedding collector would drive it. Behavior local
//! to one component is tested next to that component instead.

mod region_lifecycle;
