use alloc_cortex_m::CortexMHeap;
use core::mem::MaybeUninit;
use core::ptr::addr_of_mut;

#[global_allocator]
static ALLOCATOR: CortexMHeap = CortexMHeap::empty();

const HEAP_SIZE: usize = 64 * 1024;
static mut HEAP_MEM: [MaybeUninit<u8>; HEAP_SIZE] = [MaybeUninit::uninit(); HEAP_SIZE];

pub fn init_allocator() {
    unsafe { ALLOCATOR.init(addr_of_mut!(HEAP_MEM) as usize, HEAP_SIZE) }
}
