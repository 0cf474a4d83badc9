//! Persisted user configuration, replicated from master to slave and kept identical on both halves.

use splitkb_common::rpc::RPC_BUFFER_SIZE;

use crate::wire::{Packed, Reader, Writer};

/// Marks a user datablock that has been initialized by this firmware.
pub const CHECK_VALUE: u8 = 0xa5;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Hsv {
    pub h: u8,
    pub s: u8,
    pub v: u8,
}
impl Hsv {
    pub const fn new(h: u8, s: u8, v: u8) -> Self {
        Self { h, s, v }
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Rotation {
    #[default]
    R0 = 0,
    R90 = 1,
    R180 = 2,
    R270 = 3,
}
impl Rotation {
    fn from_u8(v: u8) -> Self {
        match v & 3 {
            1 => Self::R90,
            2 => Self::R180,
            3 => Self::R270,
            _ => Self::R0,
        }
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum MenuSide {
    Left = 0,
    #[default]
    Right = 1,
    Both = 2,
}
impl MenuSide {
    fn from_u8(v: u8) -> Self {
        match v {
            0 => Self::Left,
            2 => Self::Both,
            _ => Self::Right,
        }
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DisplayConfig {
    pub oled: Hsv,
    pub painter_primary: Hsv,
    pub painter_secondary: Hsv,
    pub rotation: Rotation,
    pub inverted: bool,
    pub menu_side: MenuSide,
}
impl DisplayConfig {
    /// True when a change from `other` requires the display to be initialized again.
    pub fn needs_reinit(&self, other: &DisplayConfig) -> bool {
        self.rotation != other.rotation || self.inverted != other.inverted
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RgbConfig {
    pub layer_change: bool,
    pub idle_anim: bool,
}

/// Pointer acceleration curve. See [crate::pointing::accelerate].
#[derive(Debug, Default, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AccelConfig {
    pub enabled: bool,
    pub takeoff: f32,
    pub growth: f32,
    /// Counts per millisecond below which no acceleration applies.
    pub offset: f32,
    /// Largest multiplier.
    pub limit: f32,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AutoMouseConfig {
    pub enabled: bool,
    pub layer: u8,
    pub timeout_ms: u16,
    pub debounce_ms: u8,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct JigglerConfig {
    pub enabled: bool,
    pub timeout_s: u8,
}

#[derive(Debug, Default, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PointingConfig {
    pub accel: AccelConfig,
    pub auto_mouse: AutoMouseConfig,
    pub jiggler: JigglerConfig,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GamingConfig {
    pub swapped_numbers: bool,
    /// SOCD "clap trap": the last pressed of two opposing directions wins.
    pub socd_cleaner: bool,
    pub overwatch_mode: bool,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RtcConfig {
    /// Whole hours from UTC.
    pub timezone: i8,
    pub dst: bool,
    pub format_24h: bool,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DebugFlags(pub u8);
impl DebugFlags {
    pub const MATRIX_SCAN: u8 = 0x01;
    pub const I2C_SCAN: u8 = 0x02;
    pub const POINTING: u8 = 0x04;
    pub const RTC: u8 = 0x08;

    pub fn contains(&self, flag: u8) -> bool {
        self.0 & flag == flag
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct UserConfig {
    pub display: DisplayConfig,
    pub rgb: RgbConfig,
    pub pointing: PointingConfig,
    pub gaming: GamingConfig,
    pub rtc: RtcConfig,
    pub debug: DebugFlags,
    pub check: u8,
}

impl Default for UserConfig {
    fn default() -> Self {
        Self {
            display: DisplayConfig {
                oled: Hsv::new(0, 0, 255),
                painter_primary: Hsv::new(85, 255, 255),
                painter_secondary: Hsv::new(170, 255, 255),
                ..Default::default()
            },
            rgb: RgbConfig {
                layer_change: true,
                idle_anim: false,
            },
            pointing: PointingConfig {
                accel: AccelConfig {
                    enabled: false,
                    takeoff: 0.1,
                    growth: 0.5,
                    offset: 0.5,
                    limit: 4.0,
                },
                auto_mouse: AutoMouseConfig {
                    enabled: true,
                    layer: 7,
                    timeout_ms: 650,
                    debounce_ms: 25,
                },
                jiggler: JigglerConfig {
                    enabled: false,
                    timeout_s: 30,
                },
            },
            gaming: GamingConfig::default(),
            rtc: RtcConfig {
                timezone: 0,
                dst: false,
                format_24h: true,
            },
            debug: DebugFlags::default(),
            check: CHECK_VALUE,
        }
    }
}

impl UserConfig {
    /// All zero; what a slave holds before its first sync.
    pub const fn blank() -> Self {
        Self {
            display: DisplayConfig {
                oled: Hsv::new(0, 0, 0),
                painter_primary: Hsv::new(0, 0, 0),
                painter_secondary: Hsv::new(0, 0, 0),
                rotation: Rotation::R0,
                inverted: false,
                menu_side: MenuSide::Left,
            },
            rgb: RgbConfig {
                layer_change: false,
                idle_anim: false,
            },
            pointing: PointingConfig {
                accel: AccelConfig {
                    enabled: false,
                    takeoff: 0.0,
                    growth: 0.0,
                    offset: 0.0,
                    limit: 0.0,
                },
                auto_mouse: AutoMouseConfig {
                    enabled: false,
                    layer: 0,
                    timeout_ms: 0,
                    debounce_ms: 0,
                },
                jiggler: JigglerConfig {
                    enabled: false,
                    timeout_s: 0,
                },
            },
            gaming: GamingConfig {
                swapped_numbers: false,
                socd_cleaner: false,
                overwatch_mode: false,
            },
            rtc: RtcConfig {
                timezone: 0,
                dst: false,
                format_24h: false,
            },
            debug: DebugFlags(0),
            check: 0,
        }
    }

    pub fn is_initialized(&self) -> bool {
        self.check == CHECK_VALUE
    }

    pub fn to_bytes(&self) -> [u8; Self::SIZE] {
        let mut buf = [0; Self::SIZE];
        self.pack_into(&mut buf);
        buf
    }
}

fn put_hsv(w: &mut Writer<'_>, hsv: &Hsv) {
    w.put_bytes(&[hsv.h, hsv.s, hsv.v]);
}

fn hsv(r: &mut Reader<'_>) -> Hsv {
    let [h, s, v] = r.array();
    Hsv { h, s, v }
}

impl Packed for UserConfig {
    const SIZE: usize = 40;

    fn pack(&self, w: &mut Writer<'_>) {
        let d = &self.display;
        put_hsv(w, &d.oled);
        put_hsv(w, &d.painter_primary);
        put_hsv(w, &d.painter_secondary);
        w.put_u8(d.rotation as u8);
        w.put_flags(&[d.inverted]);
        w.put_u8(d.menu_side as u8);

        w.put_flags(&[self.rgb.layer_change, self.rgb.idle_anim]);

        let p = &self.pointing;
        w.put_flags(&[p.accel.enabled, p.auto_mouse.enabled, p.jiggler.enabled]);
        w.put_f32(p.accel.takeoff);
        w.put_f32(p.accel.growth);
        w.put_f32(p.accel.offset);
        w.put_f32(p.accel.limit);
        w.put_u8(p.auto_mouse.layer);
        w.put_u16(p.auto_mouse.timeout_ms);
        w.put_u8(p.auto_mouse.debounce_ms);
        w.put_u8(p.jiggler.timeout_s);

        let g = &self.gaming;
        w.put_flags(&[g.swapped_numbers, g.socd_cleaner, g.overwatch_mode]);

        w.put_i8(self.rtc.timezone);
        w.put_flags(&[self.rtc.dst, self.rtc.format_24h]);

        w.put_u8(self.debug.0);
        w.put_u8(self.check);
    }

    fn unpack(r: &mut Reader<'_>) -> Self {
        let oled = hsv(r);
        let painter_primary = hsv(r);
        let painter_secondary = hsv(r);
        let rotation = Rotation::from_u8(r.u8());
        let [inverted] = r.flags();
        let menu_side = MenuSide::from_u8(r.u8());

        let [layer_change, idle_anim] = r.flags();

        let [accel_enabled, auto_mouse_enabled, jiggler_enabled] = r.flags();
        let accel = AccelConfig {
            enabled: accel_enabled,
            takeoff: r.f32(),
            growth: r.f32(),
            offset: r.f32(),
            limit: r.f32(),
        };
        let auto_mouse = AutoMouseConfig {
            enabled: auto_mouse_enabled,
            layer: r.u8(),
            timeout_ms: r.u16(),
            debounce_ms: r.u8(),
        };
        let jiggler = JigglerConfig {
            enabled: jiggler_enabled,
            timeout_s: r.u8(),
        };

        let [swapped_numbers, socd_cleaner, overwatch_mode] = r.flags();

        let timezone = r.i8();
        let [dst, format_24h] = r.flags();

        Self {
            display: DisplayConfig {
                oled,
                painter_primary,
                painter_secondary,
                rotation,
                inverted,
                menu_side,
            },
            rgb: RgbConfig {
                layer_change,
                idle_anim,
            },
            pointing: PointingConfig {
                accel,
                auto_mouse,
                jiggler,
            },
            gaming: GamingConfig {
                swapped_numbers,
                socd_cleaner,
                overwatch_mode,
            },
            rtc: RtcConfig {
                timezone,
                dst,
                format_24h,
            },
            debug: DebugFlags(r.u8()),
            check: r.u8(),
        }
    }
}

const _: () = assert!(UserConfig::SIZE <= RPC_BUFFER_SIZE);

#[cfg(test)]
#[path = "user_config_test.rs"]
mod test;
