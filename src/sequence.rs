pub mod sequence {
    use std::fmt;
    use std::iter::FromIterator;
    use thiserror::Error;

    /// 邻居查询在没有前驱或后继时返回的字面量
    pub const NO_NEIGHBOR: &str = "[None]";

    // 错误定义
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
    pub enum SequenceError {
        #[error("no such element")]
        NotFound,
    }

    // 节点记录，只由 Sequence 创建和释放
    #[derive(Debug, Clone)]
    struct Link<T> {
        value: T,
        previous: Option<usize>,
        next: Option<usize>,
    }

    /// 双向链表序列容器
    ///
    /// 所有节点保存在容器独占的槽位数组中，`previous` 与 `next` 是槽位下标。
    /// 每个节点只有一个所有者（槽位数组），反向链接只是查找关系。
    /// 不维护尾指针，尾部相关操作需要从头遍历。
    #[derive(Clone)]
    pub struct Sequence<T> {
        slots: Vec<Option<Link<T>>>,
        vacant: Vec<usize>,
        head: Option<usize>,
        count: usize,
    }

    // 基础实现
    impl<T> Sequence<T> {
        /// 构造一个新的空序列
        ///
        /// # 返回值
        /// 返回一个空的 `Sequence`，其中：
        /// - `head`: 为 `None`
        /// - `count`: 为 0
        pub fn new() -> Self {
            Sequence {
                slots: Vec::new(),
                vacant: Vec::new(),
                head: None,
                count: 0,
            }
        }

        /// 获取序列当前的元素数量
        pub fn len(&self) -> usize {
            self.count
        }

        /// 判断序列是否为空
        pub fn is_empty(&self) -> bool {
            self.count == 0
        }

        /// 移除所有元素，恢复为空序列
        ///
        /// # 操作逻辑
        /// 1. 丢弃整个槽位数组，每个节点恰好释放一次
        /// 2. 头指针置空，长度归零
        ///
        /// 对空序列调用不做任何事。
        pub fn clear(&mut self) {
            self.slots.clear();
            self.vacant.clear();
            self.head = None;
            self.count = 0;
            log::trace!("sequence cleared");
        }

        /// 获取头部元素的引用
        ///
        /// # 返回值
        /// - 序列非空时返回 `Ok(&value)`
        /// - 序列为空时返回 `Err(SequenceError::NotFound)`
        pub fn front(&self) -> Result<&T, SequenceError> {
            let head = self.head.ok_or(SequenceError::NotFound)?;
            Ok(&self.link(head).value)
        }

        /// 获取尾部元素的引用
        ///
        /// # 返回值
        /// - 序列非空时返回 `Ok(&value)`
        /// - 序列为空时返回 `Err(SequenceError::NotFound)`
        ///
        /// # 操作逻辑
        /// 没有尾指针，从头节点沿 `next` 遍历到最后一个节点，O(n)。
        pub fn back(&self) -> Result<&T, SequenceError> {
            let last = self.last().ok_or(SequenceError::NotFound)?;
            Ok(&self.link(last).value)
        }

        /// 在序列头部插入一个新元素
        ///
        /// # 参数
        /// - `value`: 要插入的数据
        ///
        /// # 操作逻辑
        /// 1. 分配新节点，前驱为空，后继为当前头节点
        /// 2. 如果旧头节点存在，把它的前驱改为新节点
        /// 3. 更新头指针，长度加 1
        pub fn push_front(&mut self, value: T) {
            let index = self.allocate(Link {
                value,
                previous: None,
                next: self.head,
            });

            if let Some(old_head) = self.head {
                self.link_mut(old_head).previous = Some(index);
            }

            self.head = Some(index);
            self.count += 1;
            log::trace!("push_front: len = {}", self.count);
        }

        /// 在序列尾部插入一个新元素
        ///
        /// # 参数
        /// - `value`: 要插入的数据
        ///
        /// # 操作逻辑
        /// 1. 序列为空时交给 `push_front`
        /// 2. 否则遍历到最后一个节点，把新节点挂在它之后
        /// 3. 长度加 1
        pub fn push_back(&mut self, value: T) {
            let Some(last) = self.last() else {
                self.push_front(value);
                return;
            };

            let index = self.allocate(Link {
                value,
                previous: Some(last),
                next: None,
            });
            self.link_mut(last).next = Some(index);
            self.count += 1;
            log::trace!("push_back: len = {}", self.count);
        }

        /// 移除并返回头部元素
        ///
        /// # 返回值
        /// - 序列非空时返回 `Ok(value)`
        /// - 序列为空时返回 `Err(SequenceError::NotFound)`，序列不变
        ///
        /// # 操作逻辑
        /// 1. 释放头节点
        /// 2. 后继节点（如果存在）成为新的头节点，并清空它的前驱
        /// 3. 长度减 1
        pub fn pop_front(&mut self) -> Result<T, SequenceError> {
            let head = self.head.ok_or(SequenceError::NotFound)?;
            let link = self.release(head);

            self.head = link.next;
            if let Some(next) = link.next {
                self.link_mut(next).previous = None;
            }

            self.count -= 1;
            log::trace!("pop_front: len = {}", self.count);
            Ok(link.value)
        }

        /// 移除并返回尾部元素
        ///
        /// # 返回值
        /// - 序列非空时返回 `Ok(value)`
        /// - 序列为空时返回 `Err(SequenceError::NotFound)`，序列不变
        ///
        /// # 操作逻辑
        /// 1. 只剩一个节点时交给 `pop_front`
        /// 2. 否则遍历到最后一个节点并释放它
        /// 3. 清空前驱节点的后继，长度减 1
        pub fn pop_back(&mut self) -> Result<T, SequenceError> {
            if self.count == 1 {
                return self.pop_front();
            }

            let last = self.last().ok_or(SequenceError::NotFound)?;
            let link = self.release(last);

            if let Some(previous) = link.previous {
                self.link_mut(previous).next = None;
            }

            self.count -= 1;
            log::trace!("pop_back: len = {}", self.count);
            Ok(link.value)
        }

        fn link(&self, index: usize) -> &Link<T> {
            match self.slots.get(index) {
                Some(Some(link)) => link,
                _ => unreachable!("slot {index} is linked but vacant"),
            }
        }

        fn link_mut(&mut self, index: usize) -> &mut Link<T> {
            match self.slots.get_mut(index) {
                Some(Some(link)) => link,
                _ => unreachable!("slot {index} is linked but vacant"),
            }
        }

        // 优先复用空闲槽位
        fn allocate(&mut self, link: Link<T>) -> usize {
            match self.vacant.pop() {
                Some(index) => {
                    self.slots[index] = Some(link);
                    index
                }
                None => {
                    self.slots.push(Some(link));
                    self.slots.len() - 1
                }
            }
        }

        fn release(&mut self, index: usize) -> Link<T> {
            let link = match self.slots.get_mut(index).and_then(Option::take) {
                Some(link) => link,
                None => unreachable!("slot {index} released twice"),
            };
            self.vacant.push(index);
            link
        }

        fn last(&self) -> Option<usize> {
            let mut index = self.head?;
            while let Some(next) = self.link(index).next {
                index = next;
            }
            Some(index)
        }

        fn values(&self) -> Values<'_, T> {
            Values {
                sequence: self,
                cursor: self.head,
            }
        }
    }

    // 查找与按值插入/移除
    impl<T: PartialEq> Sequence<T> {
        /// 判断序列中是否存在与给定值相等的元素
        pub fn contains(&self, value: &T) -> bool {
            self.values().any(|candidate| candidate == value)
        }

        /// 在第一个等于 `target` 的元素之前插入 `value`
        ///
        /// # 参数
        /// - `target`: 要查找的元素
        /// - `value`: 要插入的数据
        ///
        /// # 返回值
        /// - 找到目标时返回 `Ok(())`
        /// - 找不到目标时返回 `Err(SequenceError::NotFound)`，序列不变
        ///
        /// # 操作逻辑
        /// 1. 从头查找第一个匹配节点，找到之前不分配任何节点
        /// 2. 匹配节点是头节点时交给 `push_front`
        /// 3. 否则把新节点接在匹配节点与其前驱之间
        pub fn insert_before(&mut self, target: &T, value: T) -> Result<(), SequenceError> {
            let found = self.find(target)?;

            let Some(previous) = self.link(found).previous else {
                self.push_front(value);
                return Ok(());
            };

            let index = self.allocate(Link {
                value,
                previous: Some(previous),
                next: Some(found),
            });
            self.link_mut(previous).next = Some(index);
            self.link_mut(found).previous = Some(index);
            self.count += 1;
            log::trace!("insert_before: len = {}", self.count);
            Ok(())
        }

        /// 在第一个等于 `target` 的元素之后插入 `value`
        ///
        /// 匹配节点是尾节点时交给 `push_back`，其余规则同 `insert_before`。
        pub fn insert_after(&mut self, target: &T, value: T) -> Result<(), SequenceError> {
            let found = self.find(target)?;

            let Some(next) = self.link(found).next else {
                self.push_back(value);
                return Ok(());
            };

            let index = self.allocate(Link {
                value,
                previous: Some(found),
                next: Some(next),
            });
            self.link_mut(next).previous = Some(index);
            self.link_mut(found).next = Some(index);
            self.count += 1;
            log::trace!("insert_after: len = {}", self.count);
            Ok(())
        }

        /// 移除第一个等于 `target` 的元素并返回它
        ///
        /// # 返回值
        /// - 找到目标时返回 `Ok(value)`
        /// - 找不到目标时返回 `Err(SequenceError::NotFound)`，序列不变
        ///
        /// # 操作逻辑
        /// 1. 匹配节点是头节点时交给 `pop_front`
        /// 2. 否则让前驱的 `next` 指向后继，后继（如果存在）的 `previous` 指向前驱
        /// 3. 释放节点，长度减 1
        pub fn remove(&mut self, target: &T) -> Result<T, SequenceError> {
            let found = self.find(target)?;

            let Some(previous) = self.link(found).previous else {
                return self.pop_front();
            };

            let link = self.release(found);
            self.link_mut(previous).next = link.next;
            if let Some(next) = link.next {
                self.link_mut(next).previous = Some(previous);
            }

            self.count -= 1;
            log::trace!("remove: len = {}", self.count);
            Ok(link.value)
        }

        // 只匹配从头开始的第一个相等节点
        fn find(&self, target: &T) -> Result<usize, SequenceError> {
            let mut cursor = self.head;
            while let Some(index) = cursor {
                let link = self.link(index);
                if &link.value == target {
                    return Ok(index);
                }
                cursor = link.next;
            }
            log::debug!("lookup missed among {} elements", self.count);
            Err(SequenceError::NotFound)
        }
    }

    // 邻居查询
    impl<T: PartialEq + fmt::Display> Sequence<T> {
        /// 返回第一个等于 `target` 的元素的前驱
        ///
        /// # 返回值
        /// - 目标是头节点时返回 `"[None]"`
        /// - 否则返回 `"[前驱]"`
        /// - 找不到目标时返回 `Err(SequenceError::NotFound)`
        pub fn value_before(&self, target: &T) -> Result<String, SequenceError> {
            let found = self.find(target)?;
            Ok(self.render_neighbor(self.link(found).previous))
        }

        /// 返回第一个等于 `target` 的元素的后继
        ///
        /// # 返回值
        /// - 目标是尾节点时返回 `"[None]"`
        /// - 否则返回 `"[后继]"`
        /// - 找不到目标时返回 `Err(SequenceError::NotFound)`
        pub fn value_after(&self, target: &T) -> Result<String, SequenceError> {
            let found = self.find(target)?;
            Ok(self.render_neighbor(self.link(found).next))
        }

        fn render_neighbor(&self, neighbor: Option<usize>) -> String {
            match neighbor {
                Some(index) => format!("[{}]", self.link(index).value),
                None => NO_NEIGHBOR.to_string(),
            }
        }
    }

    // 内部遍历，不对外暴露
    struct Values<'a, T> {
        sequence: &'a Sequence<T>,
        cursor: Option<usize>,
    }

    impl<'a, T> Iterator for Values<'a, T> {
        type Item = &'a T;

        fn next(&mut self) -> Option<Self::Item> {
            let link = self.sequence.link(self.cursor?);
            self.cursor = link.next;
            Some(&link.value)
        }
    }

    // 格式化输出: "[v1, v2, ..., vn]"
    impl<T: fmt::Display> fmt::Display for Sequence<T> {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("[")?;
            for (position, value) in self.values().enumerate() {
                if position > 0 {
                    f.write_str(", ")?;
                }
                write!(f, "{value}")?;
            }
            f.write_str("]")
        }
    }

    impl<T: fmt::Debug> fmt::Debug for Sequence<T> {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.debug_list().entries(self.values()).finish()
        }
    }

    // 从迭代器创建序列
    impl<T> FromIterator<T> for Sequence<T> {
        /// 按迭代顺序逐个 `push_back`
        fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
            let mut sequence = Sequence::new();
            sequence.extend(iter);
            sequence
        }
    }

    impl<T> Extend<T> for Sequence<T> {
        fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
            for value in iter {
                self.push_back(value);
            }
        }
    }

    impl<T> Default for Sequence<T> {
        fn default() -> Self {
            Self::new()
        }
    }

}
