// ============================================================
// Layer 3 — Domain Layer
// ============================================================
// This is the heart of the application — pure Rust structs
// and traits that define the core concepts of the system.
//
// Rules for this layer:
//   - NO clap or zip types allowed here
//   - NO file I/O here
//   - Only plain Rust structs, enums, and traits
//     (ndarray is allowed — a sensor matrix IS the domain)
//
// Why keep this layer pure?
//   - Easy to unit test (no filesystem needed)
//   - Easy to understand (no framework noise)
//   - Easy to swap implementations (just implement the trait)
//
// Think of this layer as the "dictionary" of the system —
// it defines what things ARE, not how they work.
//
// Reference: Rust Book §5 (Structs), §10 (Traits)

// One normalized sensor recording and its identifiers
pub mod record;

// The train/test run mode
pub mod mode;

// Core abstractions (traits) that other layers implement
pub mod traits;
