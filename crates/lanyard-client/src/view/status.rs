use crate::snapshot::Status;

impl Status {
    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Status::Online => "Online",
            Status::Idle => "Idle",
            Status::DoNotDisturb => "Do Not Disturb",
            Status::Offline => "Offline",
        }
    }

    /// Colour keyword for the status dot: `green`, `yellow`, `red` or `gray`.
    pub fn indicator(&self) -> &'static str {
        match self {
            Status::Online => "green",
            Status::Idle => "yellow",
            Status::DoNotDisturb => "red",
            Status::Offline => "gray",
        }
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_and_indicators() {
        assert_eq!(Status::Online.indicator(), "green");
        assert_eq!(Status::Idle.indicator(), "yellow");
        assert_eq!(Status::DoNotDisturb.label(), "Do Not Disturb");
        assert_eq!(Status::DoNotDisturb.indicator(), "red");
        assert_eq!(Status::Offline.to_string(), "Offline");
        assert_eq!(Status::Offline.indicator(), "gray");
    }
}
