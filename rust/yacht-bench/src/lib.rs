//! yacht-bench: criterion benches live under `benches/`.
