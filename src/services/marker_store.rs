/// Single-key store for the id of the last announced commit.
///
/// Both operations are best-effort: `load` yields an empty string when
/// nothing usable is stored and `save` reports failures through logging.
pub trait MarkerStore: Send + Sync {
    fn load(&self) -> String;
    fn save(&self, id: &str);
}
