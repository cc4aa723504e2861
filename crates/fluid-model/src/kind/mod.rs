mod engine;
pub use engine::EngineKind;
