#[cfg(test)]
mod tests {
    use super::super::indicators::*;
    use analysis_core::PricePoint;
    use chrono::{Duration, TimeZone, Utc};

    // Helper function to create sample price data
    fn sample_prices() -> Vec<f64> {
        vec![
            44.34, 44.09, 44.15, 43.61, 44.33, 44.83, 45.10, 45.42, 45.84, 46.08,
            45.89, 46.03, 45.61, 46.28, 46.28, 46.00, 46.03, 46.41, 46.22, 45.64,
        ]
    }

    // Helper function to create sample bars
    fn sample_points() -> Vec<PricePoint> {
        let prices = vec![
            (100.0, 102.0, 99.0, 101.0),
            (101.0, 103.0, 100.0, 102.0),
            (102.0, 104.0, 101.0, 103.0),
            (103.0, 105.0, 102.0, 104.0),
            (104.0, 106.0, 103.0, 105.0),
            (105.0, 107.0, 104.0, 106.0),
            (106.0, 108.0, 105.0, 107.0),
            (107.0, 109.0, 106.0, 108.0),
            (108.0, 110.0, 107.0, 109.0),
            (109.0, 111.0, 108.0, 110.0),
            (110.0, 112.0, 109.0, 111.0),
            (111.0, 113.0, 110.0, 112.0),
            (112.0, 114.0, 111.0, 113.0),
            (113.0, 115.0, 112.0, 114.0),
            (114.0, 116.0, 113.0, 115.0),
            (115.0, 117.0, 114.0, 116.0),
        ];

        prices
            .into_iter()
            .enumerate()
            .map(|(i, (open, high, low, close))| PricePoint {
                date: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
                    + Duration::days(i as i64),
                open,
                high,
                low,
                close,
                volume: 1_000_000.0,
            })
            .collect()
    }

    #[test]
    fn test_sma_basic() {
        let data = vec![1.0, 2.0, 3.0, 4.0, 5.0];
        let result = sma(&data, 3);

        assert_eq!(result.len(), 5);
        assert_eq!(result[0], None);
        assert_eq!(result[1], None);
        assert!((result[2].unwrap() - 2.0).abs() < 0.001); // (1+2+3)/3 = 2
        assert!((result[3].unwrap() - 3.0).abs() < 0.001); // (2+3+4)/3 = 3
        assert!((result[4].unwrap() - 4.0).abs() < 0.001); // (3+4+5)/3 = 4
    }

    #[test]
    fn test_sma_insufficient_data() {
        let data = vec![1.0, 2.0];
        let result = sma(&data, 5);

        assert_eq!(result, vec![None, None]);
    }

    #[test]
    fn test_sma_real_prices() {
        let prices = sample_prices();
        let result = sma(&prices, 5);

        // First SMA(5) lands on index 4 and averages the first 5 prices
        let expected_first = (44.34 + 44.09 + 44.15 + 43.61 + 44.33) / 5.0;
        assert!((result[4].unwrap() - expected_first).abs() < 0.01);
        assert!(result[5..].iter().all(Option::is_some));
    }

    #[test]
    fn test_ema_seeds_with_sma() {
        let data = vec![22.0, 24.0, 23.0, 25.0, 26.0];
        let result = ema(&data, 3);

        assert_eq!(result.len(), data.len());
        assert_eq!(result[1], None);
        let first_sma = (22.0 + 24.0 + 23.0) / 3.0;
        assert!((result[2].unwrap() - first_sma).abs() < 0.01);
    }

    #[test]
    fn test_ema_empty_data() {
        let data: Vec<f64> = vec![];
        let result = ema(&data, 5);

        assert_eq!(result.len(), 0);
    }

    #[test]
    fn test_ema_increases_with_uptrend() {
        let data = vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0];
        let result = ema(&data, 3);

        let defined: Vec<f64> = result.iter().flatten().copied().collect();
        for w in defined.windows(2) {
            assert!(w[1] > w[0]);
        }
    }

    #[test]
    fn test_rsi_bounded() {
        let prices = sample_prices();
        let result = rsi(&prices, 14);

        for value in result.iter().flatten() {
            assert!(*value >= 0.0 && *value <= 100.0);
        }
    }

    #[test]
    fn test_rsi_warm_up_window() {
        let prices = sample_prices();
        let result = rsi(&prices, 14);

        assert!(result[..14].iter().all(Option::is_none));
        assert!(result[14..].iter().all(Option::is_some));
    }

    #[test]
    fn test_rsi_insufficient_data() {
        let data = vec![1.0, 2.0, 3.0];
        let result = rsi(&data, 14);

        assert!(result.iter().all(Option::is_none));
    }

    #[test]
    fn test_rsi_overbought_on_strong_uptrend() {
        let mut uptrend = vec![100.0];
        for i in 1..20 {
            uptrend.push(100.0 + i as f64);
        }

        let result = rsi(&uptrend, 14);
        assert!(result.last().unwrap().unwrap() > 70.0);
    }

    #[test]
    fn test_macd_alignment() {
        let prices: Vec<f64> = (0..60).map(|i| 100.0 + (i as f64 * 0.3).sin()).collect();
        let result = macd(&prices, 12, 26, 9);

        assert_eq!(result.macd.len(), prices.len());
        assert_eq!(result.signal.len(), prices.len());
        assert_eq!(result.histogram.len(), prices.len());

        // MACD needs the slow EMA; the signal line needs nine MACD values
        assert!(result.macd[..25].iter().all(Option::is_none));
        assert!(result.macd[25..].iter().all(Option::is_some));
        assert!(result.signal[..33].iter().all(Option::is_none));
        assert!(result.signal[33..].iter().all(Option::is_some));
    }

    #[test]
    fn test_macd_histogram_is_line_minus_signal() {
        let prices: Vec<f64> = (0..60).map(|i| 100.0 + (i as f64 * 0.3).sin()).collect();
        let result = macd(&prices, 12, 26, 9);

        for i in 0..prices.len() {
            match (result.macd[i], result.signal[i], result.histogram[i]) {
                (Some(m), Some(s), Some(h)) => assert!((h - (m - s)).abs() < 0.001),
                (_, _, None) => assert!(result.macd[i].is_none() || result.signal[i].is_none()),
                _ => panic!("histogram defined without both inputs at {}", i),
            }
        }
    }

    #[test]
    fn test_bollinger_bands_ordering() {
        let prices = sample_prices();
        let result = bollinger_bands(&prices, 10, 2.0);

        for i in 0..prices.len() {
            if let (Some(u), Some(m), Some(l)) = (result.upper[i], result.middle[i], result.lower[i]) {
                assert!(u > m && m > l);
            }
        }
        assert!(result.upper[9..].iter().all(Option::is_some));
    }

    #[test]
    fn test_bollinger_bands_narrow_on_constant_prices() {
        let prices = vec![100.0; 20];
        let result = bollinger_bands(&prices, 10, 2.0);

        for i in 9..prices.len() {
            let width = result.upper[i].unwrap() - result.lower[i].unwrap();
            assert!(width < 1.0);
        }
    }

    #[test]
    fn test_atr_positive_and_aligned() {
        let points = sample_points();
        let result = atr(&points, 14);

        assert_eq!(result.len(), points.len());
        assert!(result[..14].iter().all(Option::is_none));
        for value in result.iter().flatten() {
            assert!(*value > 0.0);
        }
    }

    #[test]
    fn test_atr_insufficient_data() {
        let points = sample_points()[..5].to_vec();
        let result = atr(&points, 14);

        assert!(result.iter().all(Option::is_none));
    }

    #[test]
    fn test_atr_rolling_mean_of_true_range() {
        let points = sample_points();
        let result = atr(&points, 14);

        // Constant 3-point daily range and 1-point gaps give TR = 3 every bar
        assert!((result[14].unwrap() - 3.0).abs() < 0.001);
    }

    #[test]
    fn test_stochastic_bounded() {
        let points = sample_points();
        let result = stochastic(&points, 14, 3);

        for value in result.k.iter().flatten() {
            assert!(*value >= 0.0 && *value <= 100.0);
        }
        for value in result.d.iter().flatten() {
            assert!(*value >= 0.0 && *value <= 100.0);
        }
    }

    #[test]
    fn test_stochastic_warm_up() {
        let points = sample_points();
        let result = stochastic(&points, 14, 3);

        assert!(result.k[..13].iter().all(Option::is_none));
        assert!(result.k[13..].iter().all(Option::is_some));
        // %D is the SMA3 of %K, so it starts two defined bars later
        assert!(result.d[..15].iter().all(Option::is_none));
        assert!(result.d[15..].iter().all(Option::is_some));
    }

    #[test]
    fn test_stochastic_insufficient_data() {
        let points = sample_points()[..5].to_vec();
        let result = stochastic(&points, 14, 3);

        assert!(result.k.iter().all(Option::is_none));
    }

    #[test]
    fn test_stochastic_flat_window_is_midpoint() {
        let mut points = sample_points();
        for p in &mut points {
            p.high = 100.0;
            p.low = 100.0;
            p.close = 100.0;
        }
        let result = stochastic(&points, 14, 3);
        assert_eq!(result.k.last().unwrap().unwrap(), 50.0);
    }
}
