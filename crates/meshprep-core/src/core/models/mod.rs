//! Plain data models shared by the readers, the resolver and the writers.

pub mod atom;
pub mod mesh;
pub mod sphere;
