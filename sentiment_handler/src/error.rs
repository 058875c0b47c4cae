/// Everything that can go wrong while processing a single notification
/// record. Errors through [ProcessError::Persist] abort the record and leave
/// the message in the queue for redelivery; [ProcessError::Ack] is logged
/// only, since the record has already been durably written by then.
#[derive(Debug, thiserror::Error)]
pub enum ProcessError {
    #[error("malformed notification body: {details}")]
    MalformedMessage { details: String },

    #[error("could not determine size of {uri}")]
    SizeUnknown {
        uri: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("{uri} is {size} bytes, at or over the {limit} byte limit")]
    SizeExceeded { uri: String, size: i64, limit: i64 },

    #[error("{uri} does not exist")]
    ObjectMissing { uri: String },

    #[error("could not download {uri}")]
    Fetch {
        uri: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("sentiment analysis failed for {uri}")]
    Analysis {
        uri: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("could not persist sentiment record {id}")]
    Persist {
        id: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("could not delete message {message_id} from the queue")]
    Ack {
        message_id: String,
        #[source]
        source: anyhow::Error,
    },
}

impl ProcessError {
    pub fn malformed(details: &str) -> Self {
        ProcessError::MalformedMessage {
            details: details.to_string(),
        }
    }
}
