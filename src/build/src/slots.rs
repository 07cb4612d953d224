// src/build/src/slots.rs
//! 多格槽位分配
//!
//! 一个条目从锚点开始占用连续的若干格（run）。放置新条目时先驱逐包含锚点的 run，
//! 再驱逐与新区间重叠的其余 run；容量检查在任何修改之前完成，失败时不做部分修改。

use std::ops::Range;

use items::Spell;
use thiserror::Error;

/// 可以放入槽位的条目
pub trait SlotEntry: Clone {
    /// 占用格数（至少 1）
    fn width(&self) -> usize;

    /// 用于错误信息的名称
    fn label(&self) -> &str;

    fn same_entry(&self, other: &Self) -> bool;
}

impl SlotEntry for Spell {
    fn width(&self) -> usize {
        self.memory_slots()
    }

    fn label(&self) -> &str {
        &self.name
    }

    fn same_entry(&self, other: &Self) -> bool {
        if !self.id.is_empty() && !other.id.is_empty() {
            self.id == other.id
        } else {
            self.name == other.name
        }
    }
}

/// 从 `anchor` 开始的连续占用
#[derive(Debug, Clone, PartialEq)]
pub struct Run<T> {
    pub anchor: usize,
    pub entry: T,
}

impl<T: SlotEntry> Run<T> {
    pub fn new(anchor: usize, entry: T) -> Self {
        Self { anchor, entry }
    }

    /// 末尾（不含）
    pub fn end(&self) -> usize {
        self.anchor.saturating_add(self.entry.width().max(1))
    }

    pub fn range(&self) -> Range<usize> {
        self.anchor..self.end()
    }

    pub fn covers(&self, slot: usize) -> bool {
        self.range().contains(&slot)
    }

    fn intersects(&self, start: usize, end: usize) -> bool {
        self.anchor < end && start < self.end()
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SlotError {
    #[error("'{entry}' needs {width} slot(s) from slot {}, capacity is {capacity}", .anchor.saturating_add(1))]
    CapacityExceeded {
        entry: String,
        anchor: usize,
        width: usize,
        capacity: usize,
    },
    #[error("'{first}' and '{second}' occupy the same memory slots")]
    Overlap { first: String, second: String },
    #[error("'{entry}' in slot {} was rejected", .anchor.saturating_add(1))]
    Rejected { entry: String, anchor: usize },
}

/// 定长槽位上的 run 集合，按锚点排序
#[derive(Debug, Clone, PartialEq)]
pub struct SlotAllocator<T> {
    capacity: usize,
    runs: Vec<Run<T>>,
}

impl<T: SlotEntry> SlotAllocator<T> {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            runs: Vec::new(),
        }
    }

    /// 直接载入已有数据，不做任何检查（读取存档时使用）
    pub fn restore(capacity: usize, mut runs: Vec<Run<T>>) -> Self {
        runs.sort_by_key(|run| run.anchor);
        Self { capacity, runs }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// 修改容量，已有 run 保持不动，超出部分由 [`commit`](Self::commit) 报告
    pub fn set_capacity(&mut self, capacity: usize) {
        self.capacity = capacity;
    }

    pub fn runs(&self) -> &[Run<T>] {
        &self.runs
    }

    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }

    /// 覆盖 `slot` 的 run
    pub fn run_at(&self, slot: usize) -> Option<&Run<T>> {
        self.runs.iter().find(|run| run.covers(slot))
    }

    pub fn entry_at(&self, slot: usize) -> Option<&T> {
        self.run_at(slot).map(|run| &run.entry)
    }

    /// 已占用格数
    pub fn occupied(&self) -> usize {
        (0..self.end_of_runs())
            .filter(|&slot| self.run_at(slot).is_some())
            .count()
    }

    fn end_of_runs(&self) -> usize {
        self.runs.iter().map(Run::end).max().unwrap_or(0)
    }

    /// 放置条目，返回被驱逐的条目
    pub fn place(&mut self, anchor: usize, entry: T) -> Result<Vec<T>, SlotError> {
        let width = entry.width().max(1);
        let end = match anchor.checked_add(width) {
            Some(end) if end <= self.capacity => end,
            _ => {
                return Err(SlotError::CapacityExceeded {
                    entry: entry.label().to_string(),
                    anchor,
                    width,
                    capacity: self.capacity,
                });
            }
        };

        // 包含锚点的 run 必然与 [anchor, end) 相交，两步驱逐合并为一次
        let (evicted, kept): (Vec<_>, Vec<_>) = self
            .runs
            .drain(..)
            .partition(|run| run.intersects(anchor, end));
        self.runs = kept;
        self.runs.push(Run::new(anchor, entry));
        self.runs.sort_by_key(|run| run.anchor);

        Ok(evicted.into_iter().map(|run| run.entry).collect())
    }

    /// [`place`](Self::place) 的纯函数形式
    pub fn placed(&self, anchor: usize, entry: T) -> Result<Self, SlotError> {
        let mut next = self.clone();
        next.place(anchor, entry)?;
        Ok(next)
    }

    /// 移除覆盖 `slot` 的整个 run
    pub fn remove(&mut self, slot: usize) -> Option<T> {
        let index = self.runs.iter().position(|run| run.covers(slot))?;
        Some(self.runs.remove(index).entry)
    }

    pub fn removed(&self, slot: usize) -> Self {
        let mut next = self.clone();
        next.remove(slot);
        next
    }

    /// 所有互相重叠的 run 对
    pub fn overlaps(&self) -> Vec<(&Run<T>, &Run<T>)> {
        let mut pairs = Vec::new();
        for (i, first) in self.runs.iter().enumerate() {
            for second in &self.runs[i + 1..] {
                if second.intersects(first.anchor, first.end()) {
                    pairs.push((first, second));
                }
            }
        }
        pairs
    }

    /// 超出容量的 run
    pub fn out_of_bounds(&self) -> impl Iterator<Item = &Run<T>> {
        self.runs.iter().filter(|run| run.end() > self.capacity)
    }

    /// 提交前的整体检查：容量、重叠，最后逐个调用 `accept`
    pub fn commit<F>(&self, mut accept: F) -> Result<Self, SlotError>
    where
        F: FnMut(&T) -> bool,
    {
        if let Some(run) = self.out_of_bounds().next() {
            return Err(SlotError::CapacityExceeded {
                entry: run.entry.label().to_string(),
                anchor: run.anchor,
                width: run.entry.width().max(1),
                capacity: self.capacity,
            });
        }

        if let Some((first, second)) = self.overlaps().first() {
            return Err(SlotError::Overlap {
                first: first.entry.label().to_string(),
                second: second.entry.label().to_string(),
            });
        }

        for run in &self.runs {
            if !accept(&run.entry) {
                return Err(SlotError::Rejected {
                    entry: run.entry.label().to_string(),
                    anchor: run.anchor,
                });
            }
        }

        Ok(self.clone())
    }

    /// 展开成逐格视图，长度为 `len`
    pub fn cells(&self, len: usize) -> Vec<Option<&T>> {
        let mut cells = vec![None; len];
        for run in &self.runs {
            for cell in &mut cells[run.anchor.min(len)..run.end().min(len)] {
                *cell = Some(&run.entry);
            }
        }
        cells
    }

    /// 是否已放置同一条目
    pub fn contains(&self, entry: &T) -> bool {
        self.runs.iter().any(|run| run.entry.same_entry(entry))
    }
}
