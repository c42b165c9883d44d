//! View module for the Thrasybulus dashboard.
//!
//! Renders the index page (interface rows, error panel, alerts) and the
//! per-interface detail page from the synchronization snapshot.

use iced::widget::{button, column, container, row, scrollable, space, text};
use iced::{Color, Element, Length};
use thrasybulus_shared::Interface;

use crate::interface_sync::{Alert, InterfaceSync};
use crate::messages::ThrasybulusMessage;
use crate::navigation::{NavigationState, Page};
use crate::view_model::{InterfaceRow, NO_DESCRIPTION, NO_IP_ADDRESSES, StatusIndicator};

/// Color palette for consistent styling
#[derive(Clone, Copy)]
pub struct ColorPalette {
    pub primary_blue: Color,
    pub success_green: Color,
    pub error_red: Color,
    pub error_text: Color,
    pub error_background: Color,
    pub error_border: Color,
    pub text_primary: Color,
    pub text_secondary: Color,
    pub background_primary: Color,
    pub background_card: Color,
}

impl Default for ColorPalette {
    fn default() -> Self {
        Self {
            primary_blue: Color::from_rgb(0.0, 0.48, 1.0),
            success_green: Color::from_rgb(0.0, 0.8, 0.3),
            error_red: Color::from_rgb(0.9, 0.2, 0.2),
            error_text: Color::from_rgb(0.45, 0.11, 0.14),
            error_background: Color::from_rgb(0.97, 0.84, 0.85),
            error_border: Color::from_rgb(0.96, 0.78, 0.80),
            text_primary: Color::from_rgb(0.1, 0.1, 0.1),
            text_secondary: Color::from_rgb(0.4, 0.4, 0.4),
            background_primary: Color::from_rgb(0.97, 0.98, 1.0),
            background_card: Color::from_rgb(0.98, 0.99, 1.0),
        }
    }
}

/// Renders the main application view
pub fn render_main_view<'a>(
    sync: &'a InterfaceSync,
    navigation: &'a NavigationState,
    busy: bool,
) -> Element<'a, ThrasybulusMessage> {
    let colors = ColorPalette::default();

    let content = match navigation.current_page() {
        Page::Index => render_index(sync, busy, colors),
        Page::Interface => match navigation.selected_interface() {
            Some(interface) => render_interface_page(interface, sync, colors),
            None => render_internal_error("The interface page was opened without an interface.", colors),
        },
        Page::Unknown(name) => {
            render_internal_error(&format!("No page is registered as \"{}\".", name), colors)
        }
    };

    let bg_color = colors.background_primary;
    container(content)
        .padding(12)
        .width(Length::Fill)
        .height(Length::Fill)
        .style(move |_| container::Style {
            background: Some(iced::Background::Color(bg_color)),
            ..container::Style::default()
        })
        .into()
}

/// Renders the interface list page
fn render_index(
    sync: &InterfaceSync,
    busy: bool,
    colors: ColorPalette,
) -> Element<'static, ThrasybulusMessage> {
    let mut sections: Vec<Element<ThrasybulusMessage>> = vec![render_header(sync, busy, colors)];

    if let Some(error) = sync.error() {
        sections.push(render_error_box(error.head.clone(), error.body.clone(), colors));
    }

    if sync.alert_count() > 0 {
        sections.push(render_alerts(sync.alerts(), colors));
    }

    let rows = sync.rows();
    if rows.is_empty() {
        sections.push(render_empty_state(busy, colors));
    } else {
        let cards: Vec<Element<ThrasybulusMessage>> = rows
            .into_iter()
            .map(|row| render_interface_row(row, colors))
            .collect();
        sections.push(
            scrollable(column(cards).spacing(8))
                .height(Length::Fill)
                .width(Length::Fill)
                .into(),
        );
    }

    column(sections).spacing(12).into()
}

/// Renders the title bar with summary and refresh controls
fn render_header(
    sync: &InterfaceSync,
    busy: bool,
    colors: ColorPalette,
) -> Element<'static, ThrasybulusMessage> {
    let resolved = sync.statuses().len();
    let total = sync.interfaces().len();
    let summary = if busy {
        format!("{} interfaces • refreshing…", total)
    } else {
        format!("{} interfaces • {}/{} statuses", total, resolved, total)
    };

    let refresh = button(text("Refresh").size(14))
        .on_press(ThrasybulusMessage::Refresh)
        .style(move |_, _| button::Style {
            background: Some(iced::Background::Color(colors.primary_blue)),
            text_color: Color::WHITE,
            border: iced::Border {
                radius: 5.0.into(),
                width: 1.0,
                color: colors.primary_blue,
            },
            ..button::Style::default()
        });

    let recheck = button(text("Recheck status").size(14))
        .on_press(ThrasybulusMessage::RefreshStatuses)
        .style(move |_, _| button::Style {
            background: Some(iced::Background::Color(Color::WHITE)),
            text_color: colors.primary_blue,
            border: iced::Border {
                radius: 5.0.into(),
                width: 1.0,
                color: colors.primary_blue,
            },
            ..button::Style::default()
        });

    container(
        row![
            text("Thrasybulus").size(22).style(move |_| text::Style {
                color: Some(colors.text_primary)
            }),
            text(summary).size(13).style(move |_| text::Style {
                color: Some(colors.text_secondary)
            }),
            space::horizontal(),
            recheck,
            refresh,
        ]
        .spacing(10)
        .align_y(iced::Alignment::Center),
    )
    .padding(12)
    .style(move |_| card_style(colors))
    .into()
}

/// Renders the persistent error panel
fn render_error_box(
    head: String,
    body: String,
    colors: ColorPalette,
) -> Element<'static, ThrasybulusMessage> {
    container(
        column![
            text(head).size(18).style(move |_| text::Style {
                color: Some(colors.error_text)
            }),
            text(body).size(16).style(move |_| text::Style {
                color: Some(colors.error_text)
            }),
        ]
        .spacing(8),
    )
    .padding(16)
    .width(Length::Fill)
    .style(move |_| container::Style {
        background: Some(iced::Background::Color(colors.error_background)),
        border: iced::Border {
            radius: 8.0.into(),
            width: 1.0,
            color: colors.error_border,
        },
        ..container::Style::default()
    })
    .into()
}

/// Renders pending probe alerts with dismiss buttons
fn render_alerts<'a>(
    alerts: impl Iterator<Item = &'a Alert>,
    colors: ColorPalette,
) -> Element<'static, ThrasybulusMessage> {
    let mut items: Vec<Element<ThrasybulusMessage>> = alerts
        .enumerate()
        .map(|(index, alert)| -> Element<'static, ThrasybulusMessage> {
            row![
                text("⚠️").size(14),
                column![
                    text(alert.head.clone()).size(14).style(move |_| text::Style {
                        color: Some(colors.error_text)
                    }),
                    text(alert.body.clone()).size(13).style(move |_| text::Style {
                        color: Some(colors.text_primary)
                    }),
                ]
                .spacing(2),
                space::horizontal(),
                button(text("Dismiss").size(12)).on_press(ThrasybulusMessage::DismissAlert(index)),
            ]
            .spacing(8)
            .align_y(iced::Alignment::Center)
            .into()
        })
        .collect();

    if items.len() > 1 {
        items.push(
            button(text("Dismiss all").size(12))
                .on_press(ThrasybulusMessage::DismissAllAlerts)
                .into(),
        );
    }

    container(column(items).spacing(6))
        .padding(10)
        .width(Length::Fill)
        .style(move |_| container::Style {
            background: Some(iced::Background::Color(Color::from_rgba(1.0, 0.6, 0.0, 0.08))),
            border: iced::Border {
                radius: 8.0.into(),
                width: 1.0,
                color: Color::from_rgb(0.95, 0.85, 0.7),
            },
            ..container::Style::default()
        })
        .into()
}

/// Renders one interface card
fn render_interface_row(
    row_model: InterfaceRow,
    colors: ColorPalette,
) -> Element<'static, ThrasybulusMessage> {
    let status_color = status_color(row_model.status, colors);
    let addresses: Vec<Element<ThrasybulusMessage>> = row_model
        .address_lines()
        .into_iter()
        .map(|line| -> Element<'static, ThrasybulusMessage> {
            let color = if row_model.has_addresses() {
                colors.text_primary
            } else {
                colors.text_secondary
            };
            text(line.to_string())
                .size(13)
                .style(move |_| text::Style { color: Some(color) })
                .into()
        })
        .collect();

    let info = column![
        row![
            text(row_model.status.icon()).size(14),
            text(row_model.name.clone()).size(16).style(move |_| text::Style {
                color: Some(colors.text_primary)
            }),
            text(row_model.status.label()).size(12).style(move |_| text::Style {
                color: Some(status_color)
            }),
        ]
        .spacing(6)
        .align_y(iced::Alignment::Center),
        text(row_model.mac.clone()).size(12).style(move |_| text::Style {
            color: Some(colors.text_secondary)
        }),
        text(row_model.description.clone()).size(13).style(move |_| text::Style {
            color: Some(colors.text_secondary)
        }),
        column(addresses).spacing(2),
    ]
    .spacing(4);

    let manage = button(text("Manage").size(14))
        .on_press(ThrasybulusMessage::Manage(row_model.name.clone()))
        .style(move |_, _| button::Style {
            background: Some(iced::Background::Color(colors.primary_blue)),
            text_color: Color::WHITE,
            border: iced::Border {
                radius: 5.0.into(),
                width: 1.0,
                color: colors.primary_blue,
            },
            ..button::Style::default()
        });

    container(
        row![info, space::horizontal(), manage]
            .spacing(10)
            .align_y(iced::Alignment::Center),
    )
    .padding(12)
    .width(Length::Fill)
    .style(move |_| card_style(colors))
    .into()
}

/// Renders the per-interface detail page
fn render_interface_page(
    interface: Interface,
    sync: &InterfaceSync,
    colors: ColorPalette,
) -> Element<'static, ThrasybulusMessage> {
    let status = StatusIndicator::from(sync.status(&interface.name));
    let status_color = status_color(status, colors);

    let description = interface
        .display_description()
        .unwrap_or(NO_DESCRIPTION)
        .to_string();
    let addresses = if interface.ips.is_empty() {
        NO_IP_ADDRESSES.to_string()
    } else {
        interface.ips.join("\n")
    };

    let back = button(text("← Interfaces").size(14)).on_press(ThrasybulusMessage::BackToIndex);

    let details = column![
        row![
            text(status.icon()).size(18),
            text(interface.name.clone()).size(22).style(move |_| text::Style {
                color: Some(colors.text_primary)
            }),
            text(status.label()).size(14).style(move |_| text::Style {
                color: Some(status_color)
            }),
        ]
        .spacing(8)
        .align_y(iced::Alignment::Center),
        detail_line("MAC", interface.mac.clone(), colors),
        detail_line("Description", description, colors),
        detail_line("Addresses", addresses, colors),
    ]
    .spacing(10);

    column![
        back,
        container(details)
            .padding(16)
            .width(Length::Fill)
            .style(move |_| card_style(colors)),
    ]
    .spacing(12)
    .into()
}

fn detail_line(
    label: &'static str,
    value: String,
    colors: ColorPalette,
) -> Element<'static, ThrasybulusMessage> {
    row![
        text(label).size(13).width(Length::Fixed(110.0)).style(move |_| text::Style {
            color: Some(colors.text_secondary)
        }),
        text(value).size(13).style(move |_| text::Style {
            color: Some(colors.text_primary)
        }),
    ]
    .spacing(8)
    .into()
}

/// Renders the generic internal-error page for unroutable navigation state
fn render_internal_error(detail: &str, colors: ColorPalette) -> Element<'static, ThrasybulusMessage> {
    column![
        render_error_box("Internal Error".to_string(), detail.to_string(), colors),
        button(text("Back to interfaces").size(14)).on_press(ThrasybulusMessage::BackToIndex),
    ]
    .spacing(12)
    .into()
}

/// Renders the placeholder shown when there are no interfaces
fn render_empty_state(busy: bool, colors: ColorPalette) -> Element<'static, ThrasybulusMessage> {
    let (icon, title, subtitle) = if busy {
        ("🔄", "Loading Interfaces", "Waiting for the backend to list interfaces...")
    } else {
        ("📡", "No Network Interfaces", "The backend reported no interfaces")
    };

    container(
        column![
            text(icon).size(48),
            text(title).size(20).style(move |_| text::Style {
                color: Some(colors.text_primary)
            }),
            text(subtitle).size(14).style(move |_| text::Style {
                color: Some(colors.text_secondary)
            }),
        ]
        .spacing(12)
        .align_x(iced::Alignment::Center),
    )
    .padding(40)
    .width(Length::Fill)
    .style(move |_| card_style(colors))
    .into()
}

fn status_color(status: StatusIndicator, colors: ColorPalette) -> Color {
    match status {
        StatusIndicator::Active => colors.success_green,
        StatusIndicator::Inactive => colors.error_red,
        StatusIndicator::Unknown => colors.text_secondary,
    }
}

fn card_style(colors: ColorPalette) -> container::Style {
    container::Style {
        background: Some(iced::Background::Color(colors.background_card)),
        border: iced::Border {
            radius: 8.0.into(),
            width: 1.0,
            color: Color::from_rgb(0.88, 0.92, 0.98),
        },
        ..container::Style::default()
    }
}
