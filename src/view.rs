use serde::Serialize;

use crate::declare::Quote;

/// 看板的瀏覽狀態（搜尋字串、選取的個股、深色模式）。
///
/// 與快照分開保存，快照整份替換時不會動到這裡的任何欄位。
#[derive(Serialize, Debug, Clone, Default)]
pub struct ViewState {
    pub search_text: String,
    pub selected: Option<Quote>,
    pub dark_mode: bool,
}

impl ViewState {
    pub fn set_search_text(&mut self, text: impl Into<String>) {
        self.search_text = text.into();
    }

    /// 選取個股，同時清空搜尋字串
    pub fn select_quote(&mut self, quote: Quote) {
        self.selected = Some(quote);
        self.search_text.clear();
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    pub fn toggle_dark_mode(&mut self) -> bool {
        self.dark_mode = !self.dark_mode;
        self.dark_mode
    }
}
