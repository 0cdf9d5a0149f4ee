//! Movement policy for the interactive pipeline board.
//!
//! Terminal-stage cards cannot be picked up and terminal columns accept no
//! drops, so `won` and `lost` are unreachable by drag alone; closing a deal
//! goes through the explicit mark actions on [`crate::PipelineService`].

use coverline_core::domain::opportunity::Stage;

pub fn can_pick_up(stage: Stage) -> bool {
    !stage.is_terminal()
}

pub fn can_drop_into(stage: Stage) -> bool {
    !stage.is_terminal()
}

#[cfg(test)]
mod tests {
    use coverline_core::domain::opportunity::Stage;

    use super::{can_drop_into, can_pick_up};

    #[test]
    fn open_stages_are_draggable_both_ways() {
        for stage in [Stage::New, Stage::Contacted, Stage::Proposal] {
            assert!(can_pick_up(stage));
            assert!(can_drop_into(stage));
        }
    }

    #[test]
    fn terminal_stages_are_locked_out_of_the_board() {
        for stage in [Stage::Won, Stage::Lost] {
            assert!(!can_pick_up(stage));
            assert!(!can_drop_into(stage));
        }
    }
}
