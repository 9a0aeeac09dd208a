//! Reservation lifecycle as seen by staff.
//!
//! The backend owns the transition; the console only needs to know which
//! actions to offer and how to summarise a listing.

use std::{
    fmt::{self, Display},
    str::FromStr,
};

use serde::{Deserialize, Serialize};

use crate::ParseError;

/// Status of a customer reservation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReservationStatus {
    /// Submitted by a customer, awaiting review.
    Pending,
    Confirmed,
    Rejected,
}

impl ReservationStatus {
    /// Parses a status string. Accepts the backend's stored values
    /// (`Pendiente`, `Confirmada`, `Rechazada`) and English spellings.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "pendiente" | "pending" => Some(Self::Pending),
            "confirmada" | "confirmed" => Some(Self::Confirmed),
            "rechazada" | "rejected" => Some(Self::Rejected),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Rejected => "rejected",
        }
    }

    /// Returns whether staff may move a reservation from this status to `target`.
    ///
    /// Only pending reservations can be reviewed; confirmed and rejected are final.
    pub fn can_transition_to(&self, target: ReservationStatus) -> bool {
        matches!(
            (self, target),
            (Self::Pending, Self::Confirmed) | (Self::Pending, Self::Rejected)
        )
    }

    pub fn is_final(&self) -> bool {
        !matches!(self, Self::Pending)
    }
}

impl Display for ReservationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReservationStatus {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| ParseError::UnknownStatus(s.to_string()))
    }
}

/// Per-status counts shown on the dashboard summary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReservationStats {
    pub total: u64,
    pub pending: u64,
    pub confirmed: u64,
    pub rejected: u64,
}

impl ReservationStats {
    /// Tallies a listing. Statuses the console does not recognise count
    /// towards `total` only.
    pub fn tally<'a>(statuses: impl IntoIterator<Item = &'a str>) -> Self {
        let mut stats = Self::default();
        for raw in statuses {
            stats.total += 1;
            match ReservationStatus::parse(raw) {
                Some(ReservationStatus::Pending) => stats.pending += 1,
                Some(ReservationStatus::Confirmed) => stats.confirmed += 1,
                Some(ReservationStatus::Rejected) => stats.rejected += 1,
                None => {}
            }
        }
        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_parse_backend_values() {
        assert_eq!(ReservationStatus::parse("Pendiente"), Some(ReservationStatus::Pending));
        assert_eq!(ReservationStatus::parse("Confirmada"), Some(ReservationStatus::Confirmed));
        assert_eq!(ReservationStatus::parse("Rechazada"), Some(ReservationStatus::Rejected));
        assert_eq!(ReservationStatus::parse("Cancelada"), None);
        assert!("Cancelada".parse::<ReservationStatus>().is_err());
    }

    #[test]
    fn test_transitions() {
        use ReservationStatus::{Confirmed, Pending, Rejected};

        assert!(Pending.can_transition_to(Confirmed));
        assert!(Pending.can_transition_to(Rejected));
        assert!(!Pending.can_transition_to(Pending));
        assert!(!Confirmed.can_transition_to(Rejected));
        assert!(!Rejected.can_transition_to(Confirmed));
        assert!(Confirmed.is_final() && Rejected.is_final() && !Pending.is_final());
    }

    #[test]
    fn test_tally() {
        let stats = ReservationStats::tally([
            "Pendiente",
            "Confirmada",
            "Pendiente",
            "Rechazada",
            "archived",
        ]);
        assert_eq!(
            stats,
            ReservationStats {
                total: 5,
                pending: 2,
                confirmed: 1,
                rejected: 1,
            }
        );
    }

    proptest! {
        /// Known statuses never outnumber the listing.
        #[test]
        fn tally_counts_are_bounded(statuses in prop::collection::vec("[A-Za-z]{0,12}", 0..40)) {
            let stats = ReservationStats::tally(statuses.iter().map(String::as_str));
            prop_assert_eq!(stats.total, statuses.len() as u64);
            prop_assert!(stats.pending + stats.confirmed + stats.rejected <= stats.total);
        }
    }
}
