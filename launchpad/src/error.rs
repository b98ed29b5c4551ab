/// PWM configuration errors.
///
/// Every check runs before the first register write, so an error never leaves a
/// generator half configured.
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum Error {
    #[error("pin {0} has no PWM output")]
    UnsupportedPin(u8),

    #[error("couple {0} is not a complementary pair")]
    UnsupportedCouple(u8),

    #[error("PWM frequency must be positive")]
    InvalidFrequency,

    #[error("period of {ticks} ticks does not fit the generator counter")]
    PeriodOutOfRange { ticks: u32 },

    #[error("duty ratio {0} is outside [0, 1]")]
    InvalidDuty(f32),

    #[error("deadband of {0} us is negative")]
    InvalidDeadband(f32),

    #[error("deadband of {ticks} ticks does not fit the deadband registers")]
    DeadbandOutOfRange { ticks: u32 },
}
