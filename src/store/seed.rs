//! Seed data loaded into a fresh store.

use serde_json::{json, Value};

use super::Record;

fn record(value: Value) -> Record {
    match value {
        Value::Object(map) => map,
        _ => Record::new(),
    }
}

pub fn leads() -> Vec<Record> {
    vec![
        record(json!({
            "id": "1",
            "name": "John Doe",
            "email": "john@example.com",
            "phone": "+1-555-0101",
            "company": "Acme Corp",
            "status": "NEW",
            "source": "Website",
            "value": 5000,
            "createdAt": "2024-01-15T10:30:00.000Z",
            "updatedAt": "2024-01-15T10:30:00.000Z"
        })),
        record(json!({
            "id": "2",
            "name": "Jane Smith",
            "email": "jane@example.com",
            "phone": "+1-555-0102",
            "company": "Tech Solutions",
            "status": "CONTACTED",
            "source": "Referral",
            "value": 12000,
            "createdAt": "2024-01-14T14:20:00.000Z",
            "updatedAt": "2024-01-16T09:15:00.000Z"
        })),
    ]
}

pub fn opportunities() -> Vec<Record> {
    vec![
        record(json!({
            "id": "1",
            "title": "Enterprise Software License",
            "leadId": "1",
            "value": 50000,
            "stage": "PROPOSAL",
            "probability": 60,
            "expectedCloseDate": "2024-03-15",
            "createdAt": "2024-01-16T11:00:00.000Z",
            "updatedAt": "2024-01-16T11:00:00.000Z"
        })),
        record(json!({
            "id": "2",
            "title": "Consulting Services",
            "leadId": "2",
            "value": 25000,
            "stage": "NEGOTIATION",
            "probability": 80,
            "expectedCloseDate": "2024-02-28",
            "createdAt": "2024-01-17T15:45:00.000Z",
            "updatedAt": "2024-01-18T10:30:00.000Z"
        })),
    ]
}

pub fn analytics() -> Value {
    json!({
        "totalLeads": 150,
        "totalOpportunities": 45,
        "conversionRate": 30,
        "totalRevenue": 875000,
        "pipelineByStage": [
            { "stage": "PROSPECTING", "count": 12, "value": 180000 },
            { "stage": "QUALIFICATION", "count": 10, "value": 150000 },
            { "stage": "PROPOSAL", "count": 8, "value": 220000 },
            { "stage": "NEGOTIATION", "count": 5, "value": 175000 },
            { "stage": "CLOSED_WON", "count": 7, "value": 150000 }
        ],
        "monthlyRevenue": [
            { "month": "Jan", "revenue": 65000 },
            { "month": "Feb", "revenue": 72000 },
            { "month": "Mar", "revenue": 81000 },
            { "month": "Apr", "revenue": 78000 },
            { "month": "May", "revenue": 92000 },
            { "month": "Jun", "revenue": 105000 }
        ]
    })
}
