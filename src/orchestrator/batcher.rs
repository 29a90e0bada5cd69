//! 批次划分
//!
//! 把输入切成连续、不重叠的定长片段，最后一批可以更短。

use std::num::NonZeroUsize;
use std::slice::Chunks;

/// 定长分批器
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Batcher {
    size: NonZeroUsize,
}

impl Batcher {
    pub fn new(size: NonZeroUsize) -> Self {
        Self { size }
    }

    pub fn size(&self) -> usize {
        self.size.get()
    }

    /// 按顺序惰性产生各批；可重复调用，每次得到相同的批次
    pub fn batches<'a, T>(&self, items: &'a [T]) -> Chunks<'a, T> {
        items.chunks(self.size.get())
    }

    /// `len` 个元素会被分成多少批
    pub fn batch_count(&self, len: usize) -> usize {
        len.div_ceil(self.size.get())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn batcher(size: usize) -> Batcher {
        Batcher::new(NonZeroUsize::new(size).unwrap())
    }

    #[test]
    fn test_batch_sizes_for_many_lengths() {
        for size in 1..=7 {
            let batcher = batcher(size);
            for len in 0..=30 {
                let items: Vec<usize> = (0..len).collect();
                let batches: Vec<&[usize]> = batcher.batches(&items).collect();

                assert_eq!(batches.len(), len.div_ceil(size));
                assert_eq!(batches.len(), batcher.batch_count(len));

                if let Some((last, init)) = batches.split_last() {
                    assert!(init.iter().all(|batch| batch.len() == size));
                    let expected_last = if len % size == 0 { size } else { len % size };
                    assert_eq!(last.len(), expected_last);
                }

                let concatenated: Vec<usize> = batches.concat();
                assert_eq!(concatenated, items);
            }
        }
    }

    #[test]
    fn test_batches_are_restartable() {
        let batcher = batcher(120);
        let items: Vec<u32> = (0..250).collect();

        let first: Vec<&[u32]> = batcher.batches(&items).collect();
        let second: Vec<&[u32]> = batcher.batches(&items).collect();
        assert_eq!(first, second);
        assert_eq!(
            first.iter().map(|batch| batch.len()).collect::<Vec<_>>(),
            vec![120, 120, 10]
        );
    }

    #[test]
    fn test_empty_input_has_no_batches() {
        let items: Vec<u8> = Vec::new();
        assert_eq!(batcher(3).batches(&items).count(), 0);
        assert_eq!(batcher(3).batch_count(0), 0);
    }
}
