//! Home-screen result binding: takes the loader's in-memory snapshot of the
//! workspace (icons, folders, widgets, screen ordering, app list) and streams
//! it to the UI-owning consumer in viewed-page-first order, in small batches,
//! without blocking the interactive thread or racing the loader.

pub mod bind;
pub mod common;
pub mod exec;
pub mod model;
