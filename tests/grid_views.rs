//! Grid view tests: both layouts read and write the same chart session.

use odontolib::{
    parse_chart, ArchView, ChartSession, ChartState, Editor, Finding, Placement, QuadrantListView,
    StatusChoice, Taxonomy, ToothId, Zone,
};
use pretty_assertions::assert_eq;

fn id(n: u8) -> ToothId {
    ToothId::new(n).expect("charted tooth")
}

fn cell_record(view: &QuadrantListView<'_>, chart: &ChartState, tooth: u8) -> odontolib::ToothRecord {
    view.quadrants(chart)
        .into_iter()
        .flat_map(|q| q.rows)
        .find(|cell| cell.id == id(tooth))
        .map(|cell| cell.record)
        .expect("tooth listed")
}

#[test]
fn arch_click_opens_editor_and_list_sees_commit() {
    let taxonomy = Taxonomy::standard();
    let arch = ArchView::new(&taxonomy);
    let list = QuadrantListView::new(&taxonomy);
    let mut editor = Editor::new(&taxonomy);
    let mut session = ChartSession::detached(ChartState::new());

    arch.click_tooth(&mut editor, id(46), session.state()).unwrap();
    assert_eq!(editor.tooth(), Some(id(46)));
    editor.drop_symbol("obturacion", odontolib::Target::Zone(Zone::Center)).unwrap();
    editor.confirm(&mut session).unwrap();

    let record = cell_record(&list, session.state(), 46);
    assert_eq!(record.zones.get(Zone::Center), Some("obturacion"));
}

#[test]
fn brush_marks_zone_and_notifies_whole_chart() {
    let taxonomy = Taxonomy::standard();
    let mut list = QuadrantListView::new(&taxonomy);
    list.set_brush(Some("caries")).unwrap();

    let seed = parse_chart(r#"{"11":{"status":"ausente"}}"#).unwrap();
    let mut seen = Vec::new();
    {
        let mut session = ChartSession::new(seed, |chart: &ChartState| seen.push(chart.to_json().unwrap()));
        assert_eq!(
            list.click_zone(&mut session, id(36), Zone::Left),
            Some(Placement::Zone(Zone::Left))
        );
    }
    assert_eq!(
        seen,
        vec![r#"{"11":{"status":"ausente"},"36":{"zones":{"left":"caries"}}}"#.to_string()]
    );
}

#[test]
fn whole_tooth_brush_sets_status() {
    let taxonomy = Taxonomy::standard();
    let mut list = QuadrantListView::new(&taxonomy);
    list.set_brush(Some("extraccion_ind")).unwrap();
    let mut session = ChartSession::detached(ChartState::new());

    assert_eq!(list.click_zone(&mut session, id(85), Zone::Top), Some(Placement::Status));
    let record = session.state().get("85");
    assert_eq!(record.status.as_deref(), Some("extraccion_ind"));
    assert!(record.zones.is_empty());
}

#[test]
fn status_menu_choices() {
    let taxonomy = Taxonomy::standard();
    let list = QuadrantListView::new(&taxonomy);
    let labels: Vec<&str> = list.status_choices().iter().map(|c| c.label()).collect();
    assert_eq!(labels, vec!["Normal", "Ausente", "Implante", "Corona"]);

    let mut session = ChartSession::detached(parse_chart(r#"{"21":{"zones":{"top":"caries"}}}"#).unwrap());
    for (choice, status) in [
        (StatusChoice::Ausente, Some("ausente")),
        (StatusChoice::Implante, Some("implante")),
        (StatusChoice::Corona, Some("corona")),
        (StatusChoice::Normal, None),
    ] {
        list.set_status(&mut session, id(21), choice);
        let record = session.state().get("21");
        assert_eq!(record.status.as_deref(), status, "{choice:?}");
        assert_eq!(record.zones.get(Zone::Top), Some("caries"));
    }
    assert_eq!(StatusChoice::Corona.finding(), Some(Finding::Corona));
}

#[test]
fn measurements_from_either_view_agree() {
    let taxonomy = Taxonomy::standard();
    let arch = ArchView::new(&taxonomy);
    let list = QuadrantListView::new(&taxonomy);
    let mut session = ChartSession::detached(ChartState::new());

    arch.set_recesion(&mut session, id(13), "2");
    list.set_movilidad(&mut session, id(13), "I");

    let from_arch = arch
        .rows(session.state())
        .into_iter()
        .flat_map(|row| row.right.into_iter().chain(row.left))
        .find(|cell| cell.id == id(13))
        .map(|cell| cell.record)
        .unwrap();
    let from_list = cell_record(&list, session.state(), 13);

    assert_eq!(from_arch, from_list);
    assert_eq!(from_arch.recesion.as_deref(), Some("2"));
    assert_eq!(from_arch.movilidad.as_deref(), Some("I"));

    list.set_recesion(&mut session, id(13), "");
    assert_eq!(session.state().get("13").recesion, None);
}

#[test]
fn arch_cells_carry_connections() {
    let taxonomy = Taxonomy::standard();
    let chart = parse_chart(r#"{"11":{"status":"prot_total"},"21":{"status":"prot_total"},"22":{"status":"fija"}}"#).unwrap();
    let rows = ArchView::new(&taxonomy).rows(&chart);

    let t11 = rows[0].right.last().unwrap();
    let t21 = &rows[0].left[0];
    let t22 = &rows[0].left[1];
    assert!(t11.connection.right && !t11.connection.left);
    assert!(t21.connection.left && !t21.connection.right);
    assert!(!t22.connection.left && !t22.connection.right);
    assert!(!t21.render.prosthesis.as_ref().unwrap().left);
    assert!(t22.to_svg(None, &taxonomy).contains("prosthesis-left"));
}
