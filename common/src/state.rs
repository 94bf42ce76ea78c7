use defmt::Format;
use generic::gantry_error::GantryError;
use heapless::Vec;
use serde::{Deserialize, Serialize};

#[allow(non_camel_case_types)]
#[derive(Copy, Clone, PartialEq, Format, Debug, Serialize, Deserialize)]
pub enum MotionPhase {
    IDLE,
    MOVING,
}

#[derive(Clone)]
pub struct MotionState {
    state: Vec<MotionPhase, 16>,
}

impl Format for MotionState {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(fmt, "MotionState {{ state: [");

        for (i, s) in self.state.iter().enumerate() {
            if i != 0 {
                defmt::write!(fmt, ", ");
            }
            defmt::write!(fmt, "{:?}", s);
        }

        defmt::write!(fmt, "] }}");
    }
}

impl Default for MotionState {
    fn default() -> Self {
        Self::new()
    }
}

impl MotionState {
    pub fn new() -> Self {
        let state_array = [MotionPhase::IDLE];

        Self { state: Vec::from_slice(&state_array).unwrap() }
    }

    pub fn push(&mut self, new_state: MotionPhase) -> Result<(), GantryError> {
        self.state.push(new_state).map_err(|_| GantryError::StateOverflow)
    }

    pub fn pop(&mut self) -> Option<MotionPhase> {
        self.state.pop()
    }

    pub fn is_idle(&self) -> bool {
        match self.state.last() {
            None => panic!("should never happen"),
            Some(e) => *e == MotionPhase::IDLE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_idle() {
        assert!(MotionState::new().is_idle());
    }

    #[test]
    fn test_push_pop() {
        let mut state = MotionState::new();
        state.push(MotionPhase::MOVING).unwrap();
        assert!(!state.is_idle());
        assert_eq!(state.pop(), Some(MotionPhase::MOVING));
        assert!(state.is_idle());
    }

    #[test]
    fn test_overflow_is_reported() {
        let mut state = MotionState::new();
        for _ in 0..15 {
            state.push(MotionPhase::MOVING).unwrap();
        }
        assert_eq!(state.push(MotionPhase::MOVING), Err(GantryError::StateOverflow));
    }
}
