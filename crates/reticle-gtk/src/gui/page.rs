//! Demo content: a scrollable column of lockable cards.

use gtk::prelude::*;
use gtk4 as gtk;
use reticle::TargetSelector;

const CARD_BLURBS: [&str; 4] = [
    "Hover to frame this card. Press to lock instantly.",
    "Scroll while hovering; the lock drops once the card slides away.",
    "Press on empty space, then hover quickly: the lock waits a moment.",
    "The dismiss button is a target of its own inside this one.",
];

pub struct Page {
    pub root: gtk::Box,
    cards: gtk::Box,
    target_class: String,
    next_id: usize,
}

impl Page {
    pub fn new(selector: &TargetSelector, cards: usize, on_add: impl Fn() + 'static) -> Self {
        let root = gtk::Box::new(gtk::Orientation::Vertical, 16);
        root.add_css_class("reticle-page");

        let header = gtk::Box::new(gtk::Orientation::Horizontal, 12);
        let title = gtk::Label::new(Some("Reticle"));
        title.add_css_class("title-1");
        title.set_hexpand(true);
        title.set_xalign(0.0);
        let add = gtk::Button::with_label("Add card");
        add.connect_clicked(move |_| on_add());
        header.append(&title);
        header.append(&add);

        let intro = gtk::Label::new(Some(
            "Plain text is not a target; the cursor keeps spinning over it.",
        ));
        intro.set_xalign(0.0);
        intro.set_wrap(true);

        let column = gtk::Box::new(gtk::Orientation::Vertical, 24);

        root.append(&header);
        root.append(&intro);
        root.append(&column);

        let mut page = Self {
            root,
            cards: column,
            target_class: selector.class_name().to_string(),
            next_id: 0,
        };
        for _ in 0..cards {
            page.add_card();
        }
        page
    }

    pub fn add_card(&mut self) {
        self.next_id += 1;
        let id = self.next_id;

        let card = gtk::Box::new(gtk::Orientation::Vertical, 8);
        card.add_css_class("reticle-card");
        card.add_css_class(&self.target_class);

        let title = gtk::Label::new(Some(&format!("Card {id}")));
        title.add_css_class("title");
        title.set_xalign(0.0);

        let blurb = gtk::Label::new(Some(CARD_BLURBS[(id - 1) % CARD_BLURBS.len()]));
        blurb.set_xalign(0.0);
        blurb.set_wrap(true);

        let dismiss = gtk::Button::with_label("Dismiss");
        dismiss.set_halign(gtk::Align::End);
        dismiss.add_css_class(&self.target_class);
        {
            let column = self.cards.downgrade();
            let card = card.downgrade();
            dismiss.connect_clicked(move |_| {
                if let (Some(column), Some(card)) = (column.upgrade(), card.upgrade()) {
                    log::debug!("Dismissing card {id}");
                    column.remove(&card);
                }
            });
        }

        card.append(&title);
        card.append(&blurb);
        card.append(&dismiss);
        self.cards.append(&card);
    }

    /// Move the lockable marker to a new class name.
    pub fn retarget(&mut self, selector: &TargetSelector) {
        let class = selector.class_name();
        if class == self.target_class {
            return;
        }
        retag(self.cards.upcast_ref(), &self.target_class, class);
        self.target_class = class.to_string();
    }
}

fn retag(widget: &gtk::Widget, old: &str, new: &str) {
    if widget.has_css_class(old) {
        widget.remove_css_class(old);
        widget.add_css_class(new);
    }
    let mut child = widget.first_child();
    while let Some(c) = child {
        retag(&c, old, new);
        child = c.next_sibling();
    }
}
