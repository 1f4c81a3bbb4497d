pub const ACTION_DIVIDEND: &str = "DIVIDEND";
pub const ACTION_SPLIT: &str = "SPLIT";
pub const ACTION_REVERSE_SPLIT: &str = "REVERSE_SPLIT";

pub const CORPORATE_ACTION_TYPES: [&str; 3] =
    [ACTION_DIVIDEND, ACTION_SPLIT, ACTION_REVERSE_SPLIT];
