pub mod c_sequence {
    use std::ffi::{CString, c_char};
    use std::os::raw::c_int;
    use std::ptr;

    use crate::other_sequence::{Sequence, SequenceError};

    // 不透明指针类型，对C完全隐藏实现细节
    pub struct CSequence {
        inner: Sequence<i64>,
    }

    // 错误码定义
    pub const SEQ_SUCCESS: c_int = 0;
    pub const SEQ_ERROR_NULL_PTR: c_int = -1;
    pub const SEQ_ERROR_NOT_FOUND: c_int = -2;

    fn status(result: Result<(), SequenceError>) -> c_int {
        match result {
            Ok(()) => SEQ_SUCCESS,
            Err(SequenceError::NotFound) => SEQ_ERROR_NOT_FOUND,
        }
    }

    // 把结果写入输出指针，失败时不触碰输出指针
    fn write_out(value: Result<i64, SequenceError>, out: *mut i64) -> c_int {
        match value {
            Ok(value) => {
                unsafe { *out = value };
                SEQ_SUCCESS
            }
            Err(SequenceError::NotFound) => SEQ_ERROR_NOT_FOUND,
        }
    }

    fn into_c_string(text: Result<String, SequenceError>) -> *mut c_char {
        text.ok()
            .and_then(|text| CString::new(text).ok())
            .map(CString::into_raw)
            .unwrap_or(ptr::null_mut())
    }

    /// 创建一个新的C语言接口可用的序列实例
    ///
    /// 返回值:
    /// - 返回指向CSequence实例的裸指针，必须通过[seq_free]释放。
    #[unsafe(no_mangle)]
    pub extern "C" fn seq_new() -> *mut CSequence {
        Box::into_raw(Box::new(CSequence {
            inner: Sequence::new(),
        }))
    }

    /// 释放由[seq_new]创建的序列实例
    ///
    /// 参数:
    /// - `seq`: 指向CSequence实例的裸指针，该实例及其所有元素将被释放。
    ///
    /// 注意:
    /// - 若指针为空则不执行任何操作。
    #[unsafe(no_mangle)]
    pub extern "C" fn seq_free(seq: *mut CSequence) {
        if !seq.is_null() {
            unsafe {
                let _ = Box::from_raw(seq);
            }
        }
    }

    /// 获取序列长度，空指针返回0
    #[unsafe(no_mangle)]
    pub extern "C" fn seq_length(seq: *const CSequence) -> usize {
        unsafe { seq.as_ref() }.map_or(0, |seq| seq.inner.len())
    }

    /// 判断序列是否为空，空指针视为空序列
    #[unsafe(no_mangle)]
    pub extern "C" fn seq_is_empty(seq: *const CSequence) -> bool {
        unsafe { seq.as_ref() }.is_none_or(|seq| seq.inner.is_empty())
    }

    #[unsafe(no_mangle)]
    pub extern "C" fn seq_contains(seq: *const CSequence, value: i64) -> bool {
        unsafe { seq.as_ref() }.is_some_and(|seq| seq.inner.contains(&value))
    }

    #[unsafe(no_mangle)]
    pub extern "C" fn seq_clear(seq: *mut CSequence) -> c_int {
        match unsafe { seq.as_mut() } {
            Some(seq) => {
                seq.inner.clear();
                SEQ_SUCCESS
            }
            None => SEQ_ERROR_NULL_PTR,
        }
    }

    /// 在序列头部插入一个元素
    ///
    /// 返回值:
    /// - 成功返回`SEQ_SUCCESS`；
    /// - `seq`为空返回`SEQ_ERROR_NULL_PTR`。
    #[unsafe(no_mangle)]
    pub extern "C" fn seq_push_front(seq: *mut CSequence, value: i64) -> c_int {
        match unsafe { seq.as_mut() } {
            Some(seq) => {
                seq.inner.push_front(value);
                SEQ_SUCCESS
            }
            None => SEQ_ERROR_NULL_PTR,
        }
    }

    /// 在序列尾部插入一个元素，返回值同[seq_push_front]
    #[unsafe(no_mangle)]
    pub extern "C" fn seq_push_back(seq: *mut CSequence, value: i64) -> c_int {
        match unsafe { seq.as_mut() } {
            Some(seq) => {
                seq.inner.push_back(value);
                SEQ_SUCCESS
            }
            None => SEQ_ERROR_NULL_PTR,
        }
    }

    /// 在第一个等于`target`的元素之前插入`value`
    ///
    /// 返回值:
    /// - 成功返回`SEQ_SUCCESS`；
    /// - `seq`为空返回`SEQ_ERROR_NULL_PTR`；
    /// - 找不到`target`返回`SEQ_ERROR_NOT_FOUND`，序列不变。
    #[unsafe(no_mangle)]
    pub extern "C" fn seq_insert_before(seq: *mut CSequence, target: i64, value: i64) -> c_int {
        match unsafe { seq.as_mut() } {
            Some(seq) => status(seq.inner.insert_before(&target, value)),
            None => SEQ_ERROR_NULL_PTR,
        }
    }

    /// 在第一个等于`target`的元素之后插入`value`，返回值同[seq_insert_before]
    #[unsafe(no_mangle)]
    pub extern "C" fn seq_insert_after(seq: *mut CSequence, target: i64, value: i64) -> c_int {
        match unsafe { seq.as_mut() } {
            Some(seq) => status(seq.inner.insert_after(&target, value)),
            None => SEQ_ERROR_NULL_PTR,
        }
    }

    /// 读取头部元素
    ///
    /// 参数:
    /// - `seq`: 指向CSequence实例的常量裸指针。
    /// - `out`: 成功时写入头部元素的输出指针。
    ///
    /// 返回值:
    /// - 成功返回`SEQ_SUCCESS`；
    /// - `seq`或`out`为空返回`SEQ_ERROR_NULL_PTR`；
    /// - 序列为空返回`SEQ_ERROR_NOT_FOUND`，`out`不被修改。
    #[unsafe(no_mangle)]
    pub extern "C" fn seq_front(seq: *const CSequence, out: *mut i64) -> c_int {
        if out.is_null() {
            return SEQ_ERROR_NULL_PTR;
        }
        match unsafe { seq.as_ref() } {
            Some(seq) => write_out(seq.inner.front().copied(), out),
            None => SEQ_ERROR_NULL_PTR,
        }
    }

    /// 读取尾部元素，参数与返回值同[seq_front]
    #[unsafe(no_mangle)]
    pub extern "C" fn seq_back(seq: *const CSequence, out: *mut i64) -> c_int {
        if out.is_null() {
            return SEQ_ERROR_NULL_PTR;
        }
        match unsafe { seq.as_ref() } {
            Some(seq) => write_out(seq.inner.back().copied(), out),
            None => SEQ_ERROR_NULL_PTR,
        }
    }

    /// 移除头部元素并写入`out`，参数与返回值同[seq_front]
    #[unsafe(no_mangle)]
    pub extern "C" fn seq_pop_front(seq: *mut CSequence, out: *mut i64) -> c_int {
        if out.is_null() {
            return SEQ_ERROR_NULL_PTR;
        }
        match unsafe { seq.as_mut() } {
            Some(seq) => write_out(seq.inner.pop_front(), out),
            None => SEQ_ERROR_NULL_PTR,
        }
    }

    /// 移除尾部元素并写入`out`，参数与返回值同[seq_front]
    #[unsafe(no_mangle)]
    pub extern "C" fn seq_pop_back(seq: *mut CSequence, out: *mut i64) -> c_int {
        if out.is_null() {
            return SEQ_ERROR_NULL_PTR;
        }
        match unsafe { seq.as_mut() } {
            Some(seq) => write_out(seq.inner.pop_back(), out),
            None => SEQ_ERROR_NULL_PTR,
        }
    }

    /// 获取序列的字符串表示，形如`[1, 2, 3]`
    ///
    /// 返回值:
    /// - 成功时返回堆上分配的C字符串，必须通过[seq_string_free]释放；
    /// - `seq`为空时返回空指针。
    #[unsafe(no_mangle)]
    pub extern "C" fn seq_to_string(seq: *const CSequence) -> *mut c_char {
        match unsafe { seq.as_ref() } {
            Some(seq) => into_c_string(Ok(seq.inner.to_string())),
            None => ptr::null_mut(),
        }
    }

    /// 查询第一个等于`target`的元素的前驱，返回`[值]`或`[None]`
    ///
    /// 找不到`target`或`seq`为空时返回空指针。
    #[unsafe(no_mangle)]
    pub extern "C" fn seq_value_before(seq: *const CSequence, target: i64) -> *mut c_char {
        match unsafe { seq.as_ref() } {
            Some(seq) => into_c_string(seq.inner.value_before(&target)),
            None => ptr::null_mut(),
        }
    }

    /// 查询第一个等于`target`的元素的后继，返回值同[seq_value_before]
    #[unsafe(no_mangle)]
    pub extern "C" fn seq_value_after(seq: *const CSequence, target: i64) -> *mut c_char {
        match unsafe { seq.as_ref() } {
            Some(seq) => into_c_string(seq.inner.value_after(&target)),
            None => ptr::null_mut(),
        }
    }

    /// 释放由本模块返回的C字符串
    ///
    /// 注意:
    /// - 若指针为空则不执行任何操作。
    #[unsafe(no_mangle)]
    pub extern "C" fn seq_string_free(text: *mut c_char) {
        if !text.is_null() {
            unsafe {
                let _ = CString::from_raw(text);
            }
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use std::ffi::CStr;

        fn take_string(text: *mut c_char) -> Option<String> {
            if text.is_null() {
                return None;
            }
            let owned = unsafe { CStr::from_ptr(text) }.to_string_lossy().into_owned();
            seq_string_free(text);
            Some(owned)
        }

        #[test]
        fn test_round_trip_through_c_api() {
            let seq = seq_new();
            assert_eq!(seq_push_back(seq, 1), SEQ_SUCCESS);
            assert_eq!(seq_push_back(seq, 3), SEQ_SUCCESS);
            assert_eq!(seq_insert_before(seq, 3, 2), SEQ_SUCCESS);
            assert_eq!(seq_push_front(seq, 0), SEQ_SUCCESS);
            assert_eq!(seq_length(seq), 4);
            assert!(seq_contains(seq, 2));
            assert_eq!(take_string(seq_to_string(seq)).as_deref(), Some("[0, 1, 2, 3]"));
            assert_eq!(take_string(seq_value_before(seq, 0)).as_deref(), Some("[None]"));
            assert_eq!(take_string(seq_value_after(seq, 1)).as_deref(), Some("[2]"));

            let mut out: i64 = 0;
            assert_eq!(seq_back(seq, &mut out), SEQ_SUCCESS);
            assert_eq!(out, 3);
            assert_eq!(seq_pop_front(seq, &mut out), SEQ_SUCCESS);
            assert_eq!(out, 0);
            assert_eq!(seq_pop_back(seq, &mut out), SEQ_SUCCESS);
            assert_eq!(out, 3);

            assert_eq!(seq_clear(seq), SEQ_SUCCESS);
            assert!(seq_is_empty(seq));
            seq_free(seq);
        }

        #[test]
        fn test_not_found_leaves_output_untouched() {
            let seq = seq_new();
            let mut out: i64 = 77;
            assert_eq!(seq_front(seq, &mut out), SEQ_ERROR_NOT_FOUND);
            assert_eq!(seq_pop_back(seq, &mut out), SEQ_ERROR_NOT_FOUND);
            assert_eq!(out, 77);
            assert_eq!(seq_insert_after(seq, 5, 6), SEQ_ERROR_NOT_FOUND);
            assert!(take_string(seq_value_after(seq, 5)).is_none());
            assert_eq!(take_string(seq_to_string(seq)).as_deref(), Some("[]"));
            seq_free(seq);
        }

        #[test]
        fn test_null_pointers_are_rejected() {
            let mut out: i64 = 0;
            assert_eq!(seq_push_back(ptr::null_mut(), 1), SEQ_ERROR_NULL_PTR);
            assert_eq!(seq_pop_front(ptr::null_mut(), &mut out), SEQ_ERROR_NULL_PTR);
            assert_eq!(seq_clear(ptr::null_mut()), SEQ_ERROR_NULL_PTR);
            assert_eq!(seq_length(ptr::null()), 0);
            assert!(seq_is_empty(ptr::null()));
            assert!(!seq_contains(ptr::null(), 1));
            assert!(seq_to_string(ptr::null()).is_null());

            let seq = seq_new();
            assert_eq!(seq_front(seq, ptr::null_mut()), SEQ_ERROR_NULL_PTR);
            seq_free(seq);
            seq_free(ptr::null_mut());
            seq_string_free(ptr::null_mut());
        }
    }
}
