use contracts::domain::a001_vehicle_report::PhotoRef;
use contracts::projections::p001_report_sections::{ItemView, SectionView};
use leptos::prelude::*;

fn photo_grid(photos: Vec<PhotoRef>) -> impl IntoView {
    (!photos.is_empty()).then(|| {
        view! {
            <div class="photo-grid">
                {photos
                    .into_iter()
                    .map(|photo| {
                        view! {
                            <figure class="photo-item">
                                <img src=photo.url alt=photo.caption.clone() loading="lazy" />
                                <figcaption>{photo.caption}</figcaption>
                            </figure>
                        }
                    })
                    .collect_view()}
            </div>
        }
    })
}

fn item_row(item: ItemView) -> impl IntoView {
    let notes = if item.notes.is_empty() {
        "No notes provided.".to_string()
    } else {
        item.notes
    };
    let photo = item.photo.map(|photo| {
        view! { <img class="item-photo" src=photo.url alt=photo.caption loading="lazy" /> }
    });

    view! {
        <div class="checklist-item">
            <div class="item-header">
                <span>{item.name}</span>
                <span class=item.severity.css_class()>
                    {item.severity.label()}
                </span>
            </div>
            <p class="item-notes">{notes}</p>
            {photo}
        </div>
    }
}

/// Содержимое раздела отчёта (модальное окно)
#[component]
#[allow(non_snake_case)]
pub fn SectionContent(section: SectionView) -> impl IntoView {
    let SectionView {
        vehicle_fields,
        history_note,
        diagnostic_log,
        recommendations,
        photos,
        groups,
        ..
    } = section;

    let fields = (!vehicle_fields.is_empty()).then(|| {
        view! {
            <dl class="vehicle-info-grid">
                {vehicle_fields
                    .into_iter()
                    .map(|field| {
                        view! {
                            <div class="info-item">
                                <dt>{field.label}</dt>
                                <dd>{field.value}</dd>
                            </div>
                        }
                    })
                    .collect_view()}
            </dl>
        }
    });

    let history = history_note.map(|note| {
        view! {
            <div class="vehicle-history">
                <h4>"Vehicle History Notes"</h4>
                <p>{note}</p>
            </div>
        }
    });

    let log_lines = (!diagnostic_log.is_empty()).then(|| {
        view! {
            <pre class="diagnostic-log">
                {diagnostic_log
                    .into_iter()
                    .map(|line| {
                        let class = if line.success { "log-line success" } else { "log-line" };
                        view! { <div class=class>{format!("> {}", line.text)}</div> }
                    })
                    .collect_view()}
            </pre>
        }
    });

    let recommendation_list = (!recommendations.is_empty()).then(|| {
        view! {
            <div class="recommendations">
                {recommendations
                    .into_iter()
                    .map(|r| {
                        view! {
                            <div class=r.level.css_class()>
                                <strong>{r.level.label()}</strong>
                                <p>{r.text}</p>
                            </div>
                        }
                    })
                    .collect_view()}
            </div>
        }
    });

    view! {
        <div class="section-content">
            {fields}
            {history}
            {log_lines}
            {recommendation_list}
            {photo_grid(photos)}
            {groups
                .into_iter()
                .map(|group| {
                    let empty = group.items.is_empty();
                    view! {
                        <div class="checklist-group">
                            <h4>{group.heading}</h4>
                            {empty.then(|| view! { <p class="empty-state">"No items recorded."</p> })}
                            {group.items.into_iter().map(item_row).collect_view()}
                        </div>
                    }
                })
                .collect_view()}
        </div>
    }
}
