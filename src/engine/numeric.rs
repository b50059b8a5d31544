// ==========================================
// CycleEye 节拍分析系统 - 数值工具
// ==========================================
// 职责: 均值 / 样本标准差 / 线性插值分位数 / 1 位小数舍入
// 约定: 空输入返回 None,调用方按退化情形处理
// 依赖: 均值 / 标准差由 statrs 计算,这里只收敛退化情形
// ==========================================

use statrs::statistics::Statistics;

/// 算术平均
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().mean())
}

/// 样本标准差（分母 n-1）
///
/// 样本数 < 2 时 statrs 返回 NaN,这里收敛为 Some(0.0)；空输入返回 None
pub fn sample_std(values: &[f64]) -> Option<f64> {
    match values.len() {
        0 => None,
        1 => Some(0.0),
        _ => Some(values.iter().std_dev()),
    }
}

/// 线性插值分位数（位置 = (n-1)·q）
///
/// # 参数
/// - sorted: 升序数据
/// - q: 0.0 ~ 1.0
pub fn quantile_linear(sorted: &[f64], q: f64) -> Option<f64> {
    if sorted.is_empty() || !(0.0..=1.0).contains(&q) {
        return None;
    }
    let pos = (sorted.len() - 1) as f64 * q;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    let frac = pos - lo as f64;
    Some(sorted[lo] + (sorted[hi] - sorted[lo]) * frac)
}

/// 升序拷贝
pub fn sorted_copy(values: &[f64]) -> Vec<f64> {
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    sorted
}

/// 舍入到 1 位小数
///
/// 按二进制精确值做十进制舍入,恰为中点时取偶: 0.35 → 0.3, 0.25 → 0.2
pub fn round1(value: f64) -> f64 {
    if !value.is_finite() {
        return value;
    }
    format!("{:.1}", value).parse().unwrap_or(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean_and_std() {
        let values = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert!((mean(&values).unwrap() - 5.0).abs() < 1e-12);
        // 样本方差 = 32 / 7
        let std = sample_std(&values).unwrap();
        assert!((std - (32.0_f64 / 7.0).sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_degenerate_inputs() {
        assert_eq!(mean(&[]), None);
        assert_eq!(sample_std(&[]), None);
        assert_eq!(sample_std(&[3.0]), Some(0.0));
        assert_eq!(sample_std(&[5.0; 100]), Some(0.0));
    }

    #[test]
    fn test_quantile_linear_interpolation() {
        let sorted = [1.0, 2.0, 3.0, 4.0];
        // 位置 0.75 → 1.75
        assert_eq!(quantile_linear(&sorted, 0.25), Some(1.75));
        // 位置 2.25 → 3.25
        assert_eq!(quantile_linear(&sorted, 0.75), Some(3.25));
        assert_eq!(quantile_linear(&sorted, 0.0), Some(1.0));
        assert_eq!(quantile_linear(&sorted, 1.0), Some(4.0));
        assert_eq!(quantile_linear(&[7.0], 0.5), Some(7.0));
        assert_eq!(quantile_linear(&[], 0.5), None);
    }

    #[test]
    fn test_round1() {
        assert_eq!(round1(5.04), 5.0);
        assert_eq!(round1(5.06), 5.1);
        assert_eq!(round1(104.16666), 104.2);
        assert_eq!(round1(0.0), 0.0);
    }

    #[test]
    fn test_round1_uses_exact_binary_value() {
        // 0.35 的二进制值略小于 0.35
        assert_eq!(round1(0.35), 0.3);
        assert_eq!(round1(2.675), 2.7);
        // 精确中点取偶
        assert_eq!(round1(0.25), 0.2);
        assert_eq!(round1(0.75), 0.8);
        assert_eq!(round1(-1.25), -1.2);
    }
}
