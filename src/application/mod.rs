// ============================================================
// Layer 2 — Application / Use Cases
// ============================================================
// This layer orchestrates all the other layers to accomplish
// one goal: repack a directory of recording archives.
//
// Rules for this layer:
//   - No binary-format code here (that's Layer 5)
//   - No argument parsing here (that's Layer 1)
//   - No path arithmetic or extraction here (that's Layer 4)
//   - Only workflow coordination
//
// Think of this layer as the "director" — it tells other
// layers what to do but doesn't do the work itself.
//
// Reference: Clean Architecture pattern
//            Rust Book §7 (Module System)

// The one workflow: scan archives, normalize, re-persist
pub mod ingest_use_case;
