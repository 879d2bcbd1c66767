//! Preset timezone offsets with dual-language labels.

/// One selectable preset: a fixed offset and its display names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PresetZone {
    pub offset_minutes: i32,
    pub label_zh: &'static str,
    pub label_en: &'static str,
}

/// Whole-hour offsets from UTC-12 to UTC+14.
pub const PRESET_ZONES: &[PresetZone] = &[
    PresetZone { offset_minutes: -12 * 60, label_zh: "贝克岛", label_en: "Baker Island" },
    PresetZone { offset_minutes: -11 * 60, label_zh: "纽埃", label_en: "Niue" },
    PresetZone { offset_minutes: -10 * 60, label_zh: "檀香山", label_en: "Honolulu" },
    PresetZone { offset_minutes: -9 * 60, label_zh: "阿拉斯加", label_en: "Alaska" },
    PresetZone { offset_minutes: -8 * 60, label_zh: "洛杉矶", label_en: "Los Angeles" },
    PresetZone { offset_minutes: -7 * 60, label_zh: "丹佛", label_en: "Denver" },
    PresetZone { offset_minutes: -6 * 60, label_zh: "芝加哥", label_en: "Chicago" },
    PresetZone { offset_minutes: -5 * 60, label_zh: "纽约/多伦多", label_en: "New York/Toronto" },
    PresetZone { offset_minutes: -4 * 60, label_zh: "圣保罗/大西洋", label_en: "Sao Paulo/Atlantic" },
    PresetZone { offset_minutes: -3 * 60, label_zh: "布宜诺斯艾利斯", label_en: "Buenos Aires" },
    PresetZone { offset_minutes: -2 * 60, label_zh: "南乔治亚", label_en: "South Georgia" },
    PresetZone { offset_minutes: -1 * 60, label_zh: "亚速尔群岛", label_en: "Azores" },
    PresetZone { offset_minutes: 0, label_zh: "伦敦", label_en: "London" },
    PresetZone { offset_minutes: 1 * 60, label_zh: "柏林/巴黎", label_en: "Berlin/Paris" },
    PresetZone { offset_minutes: 2 * 60, label_zh: "雅典/开罗", label_en: "Athens/Cairo" },
    PresetZone { offset_minutes: 3 * 60, label_zh: "莫斯科/内罗毕", label_en: "Moscow/Nairobi" },
    PresetZone { offset_minutes: 4 * 60, label_zh: "迪拜", label_en: "Dubai" },
    PresetZone { offset_minutes: 5 * 60, label_zh: "伊斯兰堡", label_en: "Islamabad" },
    PresetZone { offset_minutes: 6 * 60, label_zh: "达卡", label_en: "Dhaka" },
    PresetZone { offset_minutes: 7 * 60, label_zh: "曼谷", label_en: "Bangkok" },
    PresetZone { offset_minutes: 8 * 60, label_zh: "北京/新加坡", label_en: "Beijing/Singapore" },
    PresetZone { offset_minutes: 9 * 60, label_zh: "东京/首尔", label_en: "Tokyo/Seoul" },
    PresetZone { offset_minutes: 10 * 60, label_zh: "悉尼", label_en: "Sydney" },
    PresetZone { offset_minutes: 11 * 60, label_zh: "所罗门群岛", label_en: "Solomon Islands" },
    PresetZone { offset_minutes: 12 * 60, label_zh: "奥克兰", label_en: "Auckland" },
    PresetZone { offset_minutes: 13 * 60, label_zh: "汤加", label_en: "Tonga" },
    PresetZone { offset_minutes: 14 * 60, label_zh: "基里巴斯", label_en: "Kiribati" },
];

/// Find the preset label for an offset, if one exists.
pub fn find_preset_label(offset_minutes: i32, zh: bool) -> Option<&'static str> {
    PRESET_ZONES
        .iter()
        .find(|z| z.offset_minutes == offset_minutes)
        .map(|z| if zh { z.label_zh } else { z.label_en })
}
