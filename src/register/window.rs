//! One-page physical memory window
//!
//! A window covers exactly the page containing its target word and is
//! unmapped when dropped. Nothing holds one across register reads.

use crate::error::MemoryMapError;

use memmap2::{Mmap, MmapOptions};
use std::fs::File;

const WORD: u64 = std::mem::size_of::<u32>() as u64;
const FALLBACK_PAGE_SIZE: u64 = 4096;

/// System mapping granularity
pub fn page_size() -> u64 {
    // SAFETY: sysconf has no preconditions.
    let size = unsafe { libc::sysconf(libc::_SC_PAGESIZE) };
    if size > 0 {
        size as u64
    } else {
        FALLBACK_PAGE_SIZE
    }
}

/// Round `address` down to its page boundary
///
/// `page_size` must be a power of two.
#[inline]
pub fn page_floor(address: u64, page_size: u64) -> u64 {
    address & !(page_size - 1)
}

/// Read-only mapping of the page holding one 32-bit register
pub struct RegisterWindow {
    map: Mmap,
    floor: u64,
    offset: usize,
}

impl RegisterWindow {
    /// Map the page of `file` that contains `target`
    pub fn map(file: &File, target: u64, page_size: u64) -> Result<Self, MemoryMapError> {
        if target % WORD != 0 {
            return Err(MemoryMapError::Unaligned { address: target });
        }

        let floor = page_floor(target, page_size);
        // SAFETY: the mapping is read-only and private to this window; the
        // caller keeps `file` open for as long as the window lives.
        let map = unsafe {
            MmapOptions::new()
                .offset(floor)
                .len(page_size as usize)
                .map(file)
        }
        .map_err(|source| MemoryMapError::Map {
            address: target,
            page: floor,
            source,
        })?;

        Ok(Self {
            map,
            floor,
            offset: (target - floor) as usize,
        })
    }

    /// Physical address of the first mapped byte
    pub fn floor(&self) -> u64 {
        self.floor
    }

    /// Byte offset of the target word inside the window
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Load the target word with a single 32-bit access
    pub fn read_u32(&self) -> u32 {
        debug_assert!(self.offset + WORD as usize <= self.map.len());
        // SAFETY: `offset` is 4-aligned inside a page-aligned mapping of a full
        // page, so the word is in bounds and naturally aligned. Volatile keeps
        // the load a single 32-bit access, which device registers require.
        unsafe {
            let ptr = self.map.as_ptr().add(self.offset).cast::<u32>();
            std::ptr::read_volatile(ptr)
        }
    }
}

impl Drop for RegisterWindow {
    fn drop(&mut self) {
        log::trace!("Unmapping page {:#x}", self.floor);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Seek, SeekFrom, Write};

    #[test]
    fn test_page_floor() {
        assert_eq!(page_floor(0xfb02_046c, 4096), 0xfb02_0000);
        assert_eq!(page_floor(0xfb00_e2a8, 4096), 0xfb00_e000);
        assert_eq!(page_floor(0x1000, 4096), 0x1000);
        assert_eq!(page_floor(0xfff, 4096), 0);
    }

    #[test]
    fn test_page_size_is_power_of_two() {
        assert!(page_size().is_power_of_two());
    }

    #[test]
    fn test_window_covers_one_page_at_floor() {
        let page = page_size();
        let mut file = tempfile::tempfile().unwrap();
        file.set_len(page * 2).unwrap();

        let target = page + 0x46c;
        file.seek(SeekFrom::Start(target)).unwrap();
        file.write_all(&0x0000_4b00u32.to_ne_bytes()).unwrap();
        file.flush().unwrap();

        let window = RegisterWindow::map(&file, target, page).unwrap();
        assert_eq!(window.floor(), page);
        assert_eq!(window.offset(), 0x46c);
        assert_eq!(window.read_u32(), 0x0000_4b00);
    }

    #[test]
    fn test_unaligned_target_rejected() {
        let file = tempfile::tempfile().unwrap();
        let result = RegisterWindow::map(&file, 0x1002, page_size());
        assert!(matches!(
            result,
            Err(MemoryMapError::Unaligned { address: 0x1002 })
        ));
    }
}
