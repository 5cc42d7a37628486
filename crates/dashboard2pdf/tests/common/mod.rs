//! Shared test utilities for integration tests.

#![allow(dead_code)]

use std::path::Path;
use std::thread::JoinHandle;

use dashboard2pdf::config::DATA_SHEET_NAME;

/// Minimal bytes that look like a PDF to callers checking the magic.
pub const FAKE_PDF: &[u8] = b"%PDF-1.7\n% dashboard test\n%%EOF\n";

/// A request captured by the mock conversion service.
pub struct CapturedRequest {
    pub method: String,
    pub content_type: String,
    pub body: Vec<u8>,
}

impl CapturedRequest {
    pub fn body_str(&self) -> String {
        String::from_utf8_lossy(&self.body).to_string()
    }
}

/// Start a mock conversion service on an ephemeral port.
///
/// It answers exactly one request with `status` and `body`, then returns the
/// captured request from the join handle.
pub fn start_mock_service(
    status: i32,
    body: &'static [u8],
) -> (JoinHandle<Option<CapturedRequest>>, String) {
    start_mock_service_with(status, body, || {})
}

/// Like [`start_mock_service`], running `before_respond` after the request
/// body has been read and before the response goes out.
pub fn start_mock_service_with(
    status: i32,
    body: &'static [u8],
    before_respond: impl FnOnce() + Send + 'static,
) -> (JoinHandle<Option<CapturedRequest>>, String) {
    let server = tiny_http::Server::http("127.0.0.1:0").unwrap();
    let port = match server.server_addr() {
        tiny_http::ListenAddr::IP(addr) => addr.port(),
        _ => panic!("expected IP address"),
    };

    let handle = std::thread::spawn(move || {
        let mut request = server.recv().ok()?;
        let content_type = request
            .headers()
            .iter()
            .find(|h| h.field.equiv("Content-Type"))
            .map(|h| h.value.as_str().to_string())
            .unwrap_or_default();
        let mut data = Vec::new();
        request.as_reader().read_to_end(&mut data).ok()?;
        let captured = CapturedRequest {
            method: request.method().to_string(),
            content_type,
            body: data,
        };
        before_respond();
        let response = tiny_http::Response::from_data(body).with_status_code(status);
        let _ = request.respond(response);
        Some(captured)
    });

    (handle, format!("http://127.0.0.1:{port}/forms/libreoffice/convert"))
}

/// Write a template workbook with a chart-facing `Dashboard` sheet and,
/// optionally, a `DashboardData` sheet with headers in row 1.
pub fn write_template(path: &Path, with_data_sheet: bool) {
    let mut book = umya_spreadsheet::new_file();
    {
        let sheet = book.get_sheet_mut(&0).unwrap();
        sheet.set_name("Dashboard");
        sheet.get_cell_mut("A1").set_value("Factory Dashboard");
        sheet.get_cell_mut("B2").set_formula("SUM(DashboardData!B2:B100)");
    }
    if with_data_sheet {
        let mut data = umya_spreadsheet::Worksheet::default();
        data.set_name(DATA_SHEET_NAME);
        data.get_cell_mut("A1").set_value("Month");
        data.get_cell_mut("B1").set_value("Output");
        book.add_sheet(data).unwrap();
    }
    umya_spreadsheet::writer::xlsx::write(&book, path).unwrap();
}

/// Range the dashboard chart plots.
pub const CHART_RANGE: &str = "DashboardData!$B$2:$B$4";

/// Write a template whose `Dashboard` sheet holds a bar chart over
/// [`CHART_RANGE`].
pub fn write_chart_template(path: &Path) {
    let mut book = umya_spreadsheet::new_file();
    {
        let sheet = book.get_sheet_mut(&0).unwrap();
        sheet.set_name("Dashboard");
        sheet.get_cell_mut("A1").set_value("Monthly Output");
    }
    let mut data = umya_spreadsheet::Worksheet::default();
    data.set_name(DATA_SHEET_NAME);
    data.get_cell_mut("A1").set_value("Month");
    data.get_cell_mut("B1").set_value("Output");
    book.add_sheet(data).unwrap();

    let mut from_marker = umya_spreadsheet::structs::drawing::spreadsheet::MarkerType::default();
    let mut to_marker = umya_spreadsheet::structs::drawing::spreadsheet::MarkerType::default();
    from_marker.set_coordinate("A3");
    to_marker.set_coordinate("H20");
    let mut chart = umya_spreadsheet::structs::Chart::default();
    chart
        .new_chart(
            umya_spreadsheet::structs::ChartType::BarChart,
            from_marker,
            to_marker,
            vec![CHART_RANGE],
        )
        .set_title("Output by Month");
    book.get_sheet_by_name_mut("Dashboard")
        .unwrap()
        .add_chart(chart);

    umya_spreadsheet::writer::xlsx::write(&book, path).unwrap();
}

/// Contents of every `xl/charts/chart*.xml` part in an XLSX file.
pub fn chart_parts(path: &Path) -> Vec<(String, String)> {
    let file = std::fs::File::open(path).unwrap();
    let mut archive = zip::ZipArchive::new(file).unwrap();
    let mut parts = Vec::new();
    for i in 0..archive.len() {
        let mut entry = archive.by_index(i).unwrap();
        let name = entry.name().to_string();
        if name.starts_with("xl/charts/chart") && name.ends_with(".xml") {
            let mut xml = String::new();
            std::io::Read::read_to_string(&mut entry, &mut xml).unwrap();
            parts.push((name, xml));
        }
    }
    parts
}

/// Write `contents` to `dir/name` and return the path.
pub fn write_file(dir: &Path, name: &str, contents: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, contents).unwrap();
    path
}
