pub mod p001_report_sections;
