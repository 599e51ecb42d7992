//! Remark processing utilities
//!
//! Clash and V2Ray both refuse configs in which two proxies share a name.

/// Processes a remark so it does not collide with any in `remarks_list`
///
/// A taken remark gets ` 2`, ` 3`, ... appended until it is free. Empty
/// remarks are left alone.
pub fn process_remark(remark: &mut String, remarks_list: &[String]) {
    if remark.is_empty() || !remarks_list.contains(remark) {
        return;
    }
    let base = remark.clone();
    let mut cnt = 2;
    while remarks_list.contains(remark) {
        *remark = format!("{} {}", base, cnt);
        cnt += 1;
    }
}
