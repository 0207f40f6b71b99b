use chrono::{NaiveDate, NaiveTime};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum BookingError {
    #[error("{date} is before today ({today})")]
    PastDate { date: NaiveDate, today: NaiveDate },

    #[error("choose a date before choosing a time")]
    DateRequired,

    #[error("no {vehicle} session at {time}")]
    UnknownSlot { vehicle: VehicleType, time: NaiveTime },

    #[error("the {vehicle} session at {time} is not available")]
    SlotUnavailable { vehicle: VehicleType, time: NaiveTime },

    #[error("a booking needs both a date and a time")]
    Incomplete,

    #[error("{hour:02}:{minute:02} is not a time of day")]
    InvalidTime { hour: u32, minute: u32 },

    #[error("unknown vehicle type: {0}")]
    UnknownVehicle(String),
}

//
// ─── SLOTS ─────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VehicleType {
    Car,
    Motorcycle,
}

impl VehicleType {
    pub const ALL: [VehicleType; 2] = [VehicleType::Car, VehicleType::Motorcycle];
}

impl fmt::Display for VehicleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            VehicleType::Car => "carro",
            VehicleType::Motorcycle => "moto",
        })
    }
}

impl FromStr for VehicleType {
    type Err = BookingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "car" | "carro" => Ok(VehicleType::Car),
            "moto" | "motorcycle" => Ok(VehicleType::Motorcycle),
            _ => Err(BookingError::UnknownVehicle(s.to_owned())),
        }
    }
}

/// One bookable simulator session of a day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeSlot {
    pub vehicle: VehicleType,
    pub time: NaiveTime,
    pub instructor: String,
    pub simulator: String,
    pub available: bool,
}

impl TimeSlot {
    /// An available slot at `hour:minute`.
    ///
    /// # Errors
    ///
    /// Returns `BookingError::InvalidTime` if `hour:minute` is not a clock time.
    pub fn new(
        vehicle: VehicleType,
        hour: u32,
        minute: u32,
        instructor: impl Into<String>,
        simulator: impl Into<String>,
    ) -> Result<Self, BookingError> {
        let time = NaiveTime::from_hms_opt(hour, minute, 0)
            .ok_or(BookingError::InvalidTime { hour, minute })?;
        Ok(Self {
            vehicle,
            time,
            instructor: instructor.into(),
            simulator: simulator.into(),
            available: true,
        })
    }

    #[must_use]
    pub fn unavailable(mut self) -> Self {
        self.available = false;
        self
    }
}

//
// ─── WIZARD ────────────────────────────────────────────────────────────────────
//

/// The three screens of the booking flow, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingStep {
    SelectDate,
    ChooseTime,
    Confirm,
}

impl BookingStep {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            BookingStep::SelectDate => "Selecionar Data",
            BookingStep::ChooseTime => "Escolher Horário",
            BookingStep::Confirm => "Confirmar Agendamento",
        }
    }
}

/// A confirmed simulator session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Booking {
    pub date: NaiveDate,
    pub slot: TimeSlot,
}

/// Date, then time, then confirmation.
///
/// Choosing a new date always clears the chosen time, so a slot is never
/// carried over to a day it was not picked for.
#[derive(Debug, Clone)]
pub struct BookingWizard {
    slots: Vec<TimeSlot>,
    date: Option<NaiveDate>,
    chosen: Option<usize>,
}

impl BookingWizard {
    #[must_use]
    pub fn new(slots: Vec<TimeSlot>) -> Self {
        Self {
            slots,
            date: None,
            chosen: None,
        }
    }

    #[must_use]
    pub fn step(&self) -> BookingStep {
        match (self.date, self.chosen) {
            (None, _) => BookingStep::SelectDate,
            (Some(_), None) => BookingStep::ChooseTime,
            (Some(_), Some(_)) => BookingStep::Confirm,
        }
    }

    #[must_use]
    pub fn date(&self) -> Option<NaiveDate> {
        self.date
    }

    #[must_use]
    pub fn chosen_slot(&self) -> Option<&TimeSlot> {
        self.chosen.and_then(|i| self.slots.get(i))
    }

    pub fn slots_for(&self, vehicle: VehicleType) -> impl Iterator<Item = &TimeSlot> {
        self.slots.iter().filter(move |s| s.vehicle == vehicle)
    }

    /// # Errors
    ///
    /// Returns `BookingError::PastDate` for a day before `today`; the wizard is
    /// left unchanged.
    pub fn select_date(&mut self, date: NaiveDate, today: NaiveDate) -> Result<(), BookingError> {
        if date < today {
            return Err(BookingError::PastDate { date, today });
        }
        self.date = Some(date);
        self.chosen = None;
        Ok(())
    }

    /// # Errors
    ///
    /// Refuses with `DateRequired` before a date is chosen, `UnknownSlot` when
    /// nothing runs at `time`, and `SlotUnavailable` for a slot that is taken.
    pub fn select_slot(
        &mut self,
        vehicle: VehicleType,
        time: NaiveTime,
    ) -> Result<&TimeSlot, BookingError> {
        if self.date.is_none() {
            return Err(BookingError::DateRequired);
        }
        let index = self
            .slots
            .iter()
            .position(|s| s.vehicle == vehicle && s.time == time)
            .ok_or(BookingError::UnknownSlot { vehicle, time })?;
        if !self.slots[index].available {
            return Err(BookingError::SlotUnavailable { vehicle, time });
        }
        self.chosen = Some(index);
        Ok(&self.slots[index])
    }

    /// # Errors
    ///
    /// Returns `BookingError::Incomplete` unless both a date and a slot are set.
    pub fn confirm(&self) -> Result<Booking, BookingError> {
        match (self.date, self.chosen_slot()) {
            (Some(date), Some(slot)) => Ok(Booking {
                date,
                slot: slot.clone(),
            }),
            _ => Err(BookingError::Incomplete),
        }
    }
}
