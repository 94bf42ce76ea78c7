extern crate alloc;

use alloc::vec;
use alloc::vec::Vec;
use core::cell::RefCell;

use critical_section::Mutex;
use defmt::info;

#[derive(Debug, Clone, Copy, defmt::Format)]
pub enum FutureStatus {
    Idle,
    Running,
    Completed,

    // motion status
    MotionAvailable,
    MotionBusy,
}

// Only long-running futures that need status checks get a slot.
pub enum FutureType {
    Main, // Reserved for a future that handles everything.
    Motion,
    Console,
    End,
}

impl FutureType {
    pub fn index(&self) -> usize {
        match self {
            FutureType::Main => 0,
            FutureType::Motion => 1,
            FutureType::Console => 2,

            // End needs to be the last index + 1.
            FutureType::End => 3,
        }
    }
}

static GLOBAL_STATUS: Mutex<RefCell<Vec<FutureStatus>>> = Mutex::new(RefCell::new(Vec::new()));

pub fn initialize_status() {
    critical_section::with(|cs| {
        let mut status = GLOBAL_STATUS.borrow(cs).borrow_mut();
        *status = vec![FutureStatus::Idle; FutureType::End.index()];
    });
}

#[allow(dead_code)]
fn log_global_status() {
    critical_section::with(|cs| {
        if let Ok(statuses) = GLOBAL_STATUS.borrow(cs).try_borrow() {
            info!("global_status::log_global_status(): {:?}", statuses.as_slice());
        } else {
            info!("global_status::Failed to borrow GLOBAL_STATUS");
        }
    });
}

pub fn set_status(ft: FutureType, new_status: FutureStatus) -> Option<FutureStatus> {
    critical_section::with(|cs| {
        if let Some(status) = GLOBAL_STATUS.borrow(cs).borrow_mut().get_mut(ft.index()) {
            let old_status = *status;
            *status = new_status;
            Some(old_status)
        } else {
            None
        }
    })
}

pub fn get_status(ft: FutureType) -> Option<FutureStatus> {
    critical_section::with(|cs| GLOBAL_STATUS.borrow(cs).borrow().get(ft.index()).copied())
}
