//! Thin `anyhow`-based result alias for the I/O boundary. The tracing
//! kernel itself stays infallible; this exists only for `ppm`/`main`.

pub use anyhow::{Context, Error};

pub type Result<T> = anyhow::Result<T>;
