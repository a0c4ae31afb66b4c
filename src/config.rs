/// Knobs of the rules engine. Both default to `true`.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct RulesConfig {
    /// Re-check every played move against the legal move list before applying it
    pub validate_moves: bool,
    /// Report insufficient material, fifty-move and threefold draws ahead of
    /// `Normal`/`Check`. Checkmate and stalemate are always reported.
    pub detect_draws: bool,
}

impl Default for RulesConfig {
    fn default() -> Self {
        RulesConfig {
            validate_moves: true,
            detect_draws: true,
        }
    }
}

impl RulesConfig {
    pub fn set_validate_moves(&mut self, value: bool) -> &mut Self {
        self.validate_moves = value;
        self
    }
    pub fn set_detect_draws(&mut self, value: bool) -> &mut Self {
        self.detect_draws = value;
        self
    }
}
