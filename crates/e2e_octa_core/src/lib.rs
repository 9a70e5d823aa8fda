//! Public library API for decoding OCTA images out of `.E2E` export containers.

/// Container parsing, directory walking, chunk decoding, and image extraction.
pub mod e2e;
