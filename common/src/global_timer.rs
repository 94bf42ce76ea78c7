extern crate alloc;

use alloc::boxed::Box;
use core::cell::UnsafeCell;
use core::future::Future;
use core::pin::Pin;
use core::task::{Context, Poll};

use fugit::TimerDurationU64;
use fugit::TimerInstantU64;

pub type GantryInstant = TimerInstantU64<1_000_000>;
pub type GantryDuration = TimerDurationU64<1_000_000>;

pub trait GantryTimer: Sync + Send {
    fn now(&self) -> GantryInstant;
}

static mut GLOBAL_TIMER: UnsafeCell<Option<Box<dyn GantryTimer>>> = UnsafeCell::new(None);

pub fn init_global_timer(timer: Box<dyn GantryTimer>) {
    unsafe {
        *GLOBAL_TIMER.get() = Some(timer);
    }
}

pub fn now() -> GantryInstant {
    unsafe {
        let t = GLOBAL_TIMER.get().as_ref();
        match t {
            Some(Some(timer)) => timer.as_ref().now(),
            _ => GantryInstant::from_ticks(0),
        }
    }
}

pub trait AsyncDelay {
    fn delay(&mut self, duration: GantryDuration) -> impl Future<Output = ()> + Send;
}

pub struct Delay {
    start: GantryInstant,
    duration: GantryDuration,
}

impl Delay {
    pub fn new(duration: GantryDuration) -> Self {
        Self {
            start: now(),
            duration,
        }
    }

    pub fn wait(&self) {
        loop {
            if let Some(duration) = now().checked_duration_since(self.start) {
                if duration >= self.duration {
                    break;
                }
            }
        }
    }
}

impl Future for Delay {
    type Output = ();

    fn poll(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<Self::Output> {
        if let Some(duration) = now().checked_duration_since(self.start) {
            if duration >= self.duration {
                return Poll::Ready(());
            }
        }
        Poll::Pending
    }
}

pub struct DelayCreator;

impl DelayCreator {
    pub fn new() -> Self {
        DelayCreator {}
    }
}

impl Default for DelayCreator {
    fn default() -> Self {
        Self::new()
    }
}

impl AsyncDelay for DelayCreator {
    async fn delay(&mut self, duration: GantryDuration) {
        Delay::new(duration).await
    }
}
