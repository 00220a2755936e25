//! Rendering backends for atlas framebuffers.

/// `vello_cpu` framebuffer.
pub mod cpu;
