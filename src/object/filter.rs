use serde::{Deserialize, Serialize};

/// An image filter as understood by the engine. Values are normalized (-1..=1).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "filter", content = "value")]
pub enum Filter {
    Brightness(f32),
    Contrast(f32),
    Saturation(f32),
    Blur(f32),
    Grayscale,
    Sepia,
    Invert,
    HueRotation(f32),
}

/// Slider values of the adjustment panel, in percent
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterAdjustments {
    pub brightness: i32,
    pub contrast: i32,
    pub saturation: i32,
    pub blur: i32,
}

impl FilterAdjustments {
    pub fn new(brightness: i32, contrast: i32, saturation: i32, blur: i32) -> Self {
        Self {
            brightness: brightness.clamp(-100, 100),
            contrast: contrast.clamp(-100, 100),
            saturation: saturation.clamp(-100, 100),
            blur: blur.clamp(0, 100),
        }
    }

    pub fn is_neutral(&self) -> bool {
        self.to_filters().is_empty()
    }

    /// Builds the filter list for these adjustments. Neutral sliders produce no entry.
    pub fn to_filters(&self) -> Vec<Filter> {
        let adj = Self::new(self.brightness, self.contrast, self.saturation, self.blur);
        let mut filters = Vec::new();
        if adj.brightness != 0 {
            filters.push(Filter::Brightness(adj.brightness as f32 / 100.0));
        }
        if adj.contrast != 0 {
            filters.push(Filter::Contrast(adj.contrast as f32 / 100.0));
        }
        if adj.saturation != 0 {
            filters.push(Filter::Saturation(adj.saturation as f32 / 100.0));
        }
        if adj.blur > 0 {
            filters.push(Filter::Blur(adj.blur as f32 / 100.0));
        }
        filters
    }
}

/// One-click looks offered next to the sliders
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FilterPreset {
    Grayscale,
    Sepia,
    Invert,
    Vintage,
    Cold,
    Warm,
}

impl FilterPreset {
    pub fn name(&self) -> &'static str {
        match self {
            FilterPreset::Grayscale => "Grayscale",
            FilterPreset::Sepia => "Sepia",
            FilterPreset::Invert => "Invert",
            FilterPreset::Vintage => "Vintage",
            FilterPreset::Cold => "Cold",
            FilterPreset::Warm => "Warm",
        }
    }

    pub fn to_filters(&self) -> Vec<Filter> {
        match self {
            FilterPreset::Grayscale => vec![Filter::Grayscale],
            FilterPreset::Sepia => vec![Filter::Sepia],
            FilterPreset::Invert => vec![Filter::Invert],
            FilterPreset::Vintage => vec![
                Filter::Sepia,
                Filter::Contrast(0.2),
                Filter::Brightness(-0.1),
            ],
            FilterPreset::Cold => vec![Filter::HueRotation(-0.1)],
            FilterPreset::Warm => vec![Filter::HueRotation(0.1)],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_neutral_adjustments_produce_no_filters() {
        assert!(FilterAdjustments::default().to_filters().is_empty());
        assert!(FilterAdjustments::default().is_neutral());
    }

    #[test]
    fn test_adjustments_order_and_scale() {
        let filters = FilterAdjustments::new(50, 0, -20, 10).to_filters();
        assert_eq!(
            filters,
            vec![
                Filter::Brightness(0.5),
                Filter::Saturation(-0.2),
                Filter::Blur(0.1),
            ]
        );
    }

    #[test]
    fn test_out_of_range_values_are_clamped() {
        let adj = FilterAdjustments::new(250, -400, 0, -5);
        assert_eq!(adj.brightness, 100);
        assert_eq!(adj.contrast, -100);
        assert_eq!(adj.blur, 0);

        // Direct construction bypasses `new`, conversion still clamps
        let raw = FilterAdjustments { brightness: 0, contrast: 0, saturation: 0, blur: 300 };
        assert_eq!(raw.to_filters(), vec![Filter::Blur(1.0)]);
    }

    #[test]
    fn test_vintage_preset() {
        assert_eq!(FilterPreset::Vintage.to_filters().len(), 3);
        assert_eq!(FilterPreset::Vintage.to_filters()[0], Filter::Sepia);
    }
}
