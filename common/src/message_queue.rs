extern crate alloc;

use alloc::collections::VecDeque;
use core::cell::RefCell;

use critical_section::Mutex;

pub trait MessageQueueInterface<T> {
    fn enqueue(&mut self, message: T);
    fn dequeue(&mut self) -> Option<T>;
    fn clear(&mut self);
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

pub struct MessageQueue<T> {
    queue: VecDeque<T>,
}

impl<T> MessageQueue<T> {
    pub fn new() -> Self {
        MessageQueue { queue: VecDeque::new() }
    }
}

impl<T> Default for MessageQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> MessageQueueInterface<T> for MessageQueue<T> {
    fn enqueue(&mut self, message: T) {
        self.queue.push_back(message);
    }

    fn dequeue(&mut self) -> Option<T> {
        self.queue.pop_front()
    }

    fn clear(&mut self) {
        self.queue.clear()
    }

    fn len(&self) -> usize {
        self.queue.len()
    }
}

/// Queue shared between interrupt handlers and tasks.
pub struct MessageQueueWrapper<T>(Mutex<RefCell<MessageQueue<T>>>);

impl<T> Default for MessageQueueWrapper<T> {
    fn default() -> Self {
        Self(Mutex::new(RefCell::new(MessageQueue::new())))
    }
}

impl<T> MessageQueueInterface<T> for MessageQueueWrapper<T> {
    fn enqueue(&mut self, message: T) {
        critical_section::with(|cs| self.0.borrow(cs).borrow_mut().enqueue(message))
    }

    fn dequeue(&mut self) -> Option<T> {
        critical_section::with(|cs| self.0.borrow(cs).borrow_mut().dequeue())
    }

    fn clear(&mut self) {
        critical_section::with(|cs| self.0.borrow(cs).borrow_mut().clear())
    }

    fn len(&self) -> usize {
        critical_section::with(|cs| self.0.borrow(cs).borrow().len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fifo_order() {
        let mut mq = MessageQueue::new();
        mq.enqueue(1);
        mq.enqueue(2);
        mq.enqueue(3);
        assert_eq!(mq.dequeue(), Some(1));
        assert_eq!(mq.dequeue(), Some(2));
        assert_eq!(mq.dequeue(), Some(3));
        assert_eq!(mq.dequeue(), None);
    }

    #[test]
    fn test_wrapped_queue() {
        let mut mq = MessageQueueWrapper::default();
        assert!(mq.is_empty());
        mq.enqueue("move");
        mq.enqueue("stop");
        assert_eq!(mq.len(), 2);
        assert_eq!(mq.dequeue(), Some("move"));
        mq.clear();
        assert_eq!(mq.dequeue(), None);
    }
}
