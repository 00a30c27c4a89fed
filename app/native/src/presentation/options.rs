//! `NSApplicationPresentationOptions` bit flags.

use std::fmt;
use std::ops::BitOr;

/// Bit set controlling how the menu bar and dock are presented.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct PresentationOptions(u64);

impl PresentationOptions {
    /// Normal menu bar and dock behavior.
    pub const DEFAULT: Self = Self(0);
    /// Dock appears only when the pointer reaches the screen edge.
    pub const AUTO_HIDE_DOCK: Self = Self(1 << 0);
    /// Dock is hidden and disabled.
    pub const HIDE_DOCK: Self = Self(1 << 1);
    /// Menu bar appears only when the pointer reaches the top of the screen.
    pub const AUTO_HIDE_MENU_BAR: Self = Self(1 << 2);
    /// Menu bar is hidden and disabled. Only valid together with `HIDE_DOCK`.
    pub const HIDE_MENU_BAR: Self = Self(1 << 3);
    /// Auto-hide both the menu bar and the dock.
    pub const AUTO_HIDE_ALL: Self = Self::AUTO_HIDE_MENU_BAR.union(Self::AUTO_HIDE_DOCK);

    const NAMED: [(Self, &'static str); 4] = [
        (Self::AUTO_HIDE_DOCK, "autoHideDock"),
        (Self::HIDE_DOCK, "hideDock"),
        (Self::AUTO_HIDE_MENU_BAR, "autoHideMenuBar"),
        (Self::HIDE_MENU_BAR, "hideMenuBar"),
    ];

    #[must_use]
    pub const fn from_bits(bits: u64) -> Self { Self(bits) }

    #[must_use]
    pub const fn bits(self) -> u64 { self.0 }

    #[must_use]
    pub const fn union(self, other: Self) -> Self { Self(self.0 | other.0) }

    #[must_use]
    pub const fn contains(self, other: Self) -> bool { self.0 & other.0 == other.0 }

    /// AppKit rejects a hidden menu bar unless the dock is hidden too.
    #[must_use]
    pub const fn is_valid(self) -> bool {
        !self.contains(Self::HIDE_MENU_BAR) || self.contains(Self::HIDE_DOCK)
    }
}

impl BitOr for PresentationOptions {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self { self.union(rhs) }
}

impl fmt::Display for PresentationOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if *self == Self::DEFAULT {
            return f.write_str("default");
        }

        let mut first = true;
        let mut known = Self::DEFAULT;
        for (flag, name) in Self::NAMED {
            if self.contains(flag) {
                if !first {
                    f.write_str(" | ")?;
                }
                f.write_str(name)?;
                first = false;
                known = known | flag;
            }
        }

        let unknown = self.0 & !known.0;
        if unknown != 0 {
            if !first {
                f.write_str(" | ")?;
            }
            write!(f, "{unknown:#x}")?;
        }
        Ok(())
    }
}
