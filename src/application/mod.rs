// ============================================================
// Layer 2 — Application / Use Cases
// ============================================================
// Workflow coordination only: each use case wires the data,
// ml and infra layers together for one command. No printing
// here; that belongs to the CLI layer.

// Loading FAQ records into the table
pub mod import_use_case;

// Fitting the classifier
pub mod train_use_case;

// Answering questions
pub mod ask_use_case;
