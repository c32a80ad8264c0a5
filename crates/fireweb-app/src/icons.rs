//! Icon components

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Icon {
    name: String,
}

impl Icon {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

const BUILTIN_ICONS: &[&str] = &[
    "AddLocation", "Aim", "AlarmClock", "ArrowDown", "ArrowDownBold", "ArrowLeft",
    "ArrowLeftBold", "ArrowRight", "ArrowRightBold", "ArrowUp", "ArrowUpBold", "Avatar",
    "Back", "Bell", "Box", "Calendar", "Check", "Checked", "CircleCheck", "CircleClose",
    "CirclePlus", "Clock", "Close", "Coffee", "Coin", "Collection", "CopyDocument",
    "CreditCard", "DataAnalysis", "DataLine", "Delete", "Document", "DocumentAdd",
    "Download", "Edit", "EditPen", "Expand", "Filter", "Finished", "Fold", "Food",
    "Goods", "Histogram", "House", "InfoFilled", "List", "Loading", "Location", "Menu",
    "Money", "More", "Notebook", "Plus", "PriceTag", "QuestionFilled", "Refresh",
    "RefreshRight", "Search", "Setting", "ShoppingCart", "SoldOut", "Star", "SuccessFilled",
    "Tickets", "Timer", "TrendCharts", "Upload", "User", "Wallet", "WalletFilled",
    "Warning", "WarningFilled", "ZoomIn", "ZoomOut",
];

/// The set of icons exported for global registration
#[derive(Debug, Clone, Default)]
pub struct IconSet {
    icons: Vec<Icon>,
}

impl IconSet {
    pub fn new(icons: Vec<Icon>) -> Self {
        Self { icons }
    }

    /// Icons bundled with the app
    pub fn builtin() -> Self {
        Self::new(BUILTIN_ICONS.iter().map(|name| Icon::new(*name)).collect())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Icon> {
        self.icons.iter()
    }

    pub fn len(&self) -> usize {
        self.icons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.icons.is_empty()
    }
}
