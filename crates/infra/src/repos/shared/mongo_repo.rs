use anyhow::Result;
use futures::stream::StreamExt;
use mongodb::{
    bson::{self, doc, oid::ObjectId, Document},
    Collection, Cursor,
};
use serde::{de::DeserializeOwned, Serialize};
use tracing::error;

/// Maps between a domain entity and the document it is persisted as
pub trait MongoDocument<E>: Serialize + DeserializeOwned {
    fn to_domain(self) -> E;
    fn from_domain(entity: &E) -> Self;
}

fn get_id_filter(oid: &ObjectId) -> Document {
    doc! {
        "_id": *oid
    }
}

fn entity_to_persistence<E, D: MongoDocument<E>>(entity: &E) -> Result<Document> {
    let raw = D::from_domain(entity);
    Ok(bson::to_document(&raw)?)
}

fn persistence_to_entity<E, D: MongoDocument<E>>(doc: Document) -> Result<E> {
    let raw: D = bson::from_document(doc)?;
    Ok(raw.to_domain())
}

pub async fn insert<E, D: MongoDocument<E>>(
    collection: &Collection<Document>,
    entity: &E,
) -> Result<()> {
    let doc = entity_to_persistence::<E, D>(entity)?;
    collection.insert_one(doc, None).await?;
    Ok(())
}

pub async fn find<E, D: MongoDocument<E>>(
    collection: &Collection<Document>,
    id: &ObjectId,
) -> Option<E> {
    find_one_by::<E, D>(collection, get_id_filter(id)).await
}

pub async fn find_one_by<E, D: MongoDocument<E>>(
    collection: &Collection<Document>,
    filter: Document,
) -> Option<E> {
    match collection.find_one(filter, None).await {
        Ok(Some(doc)) => match persistence_to_entity::<E, D>(doc) {
            Ok(e) => Some(e),
            Err(e) => {
                error!("Unable to deserialize document: {:?}", e);
                None
            }
        },
        Ok(None) => None,
        Err(e) => {
            error!("Error querying collection: {:?}", e);
            None
        }
    }
}

pub async fn find_many_by<E, D: MongoDocument<E>>(
    collection: &Collection<Document>,
    filter: Document,
) -> Result<Vec<E>> {
    let cursor = collection.find(filter, None).await?;
    Ok(consume_cursor::<E, D>(cursor).await)
}

/// Sets `update` on the document matching `filter` and returns whether
/// a document was modified. Used for conditional state transitions.
pub async fn update_one_by(
    collection: &Collection<Document>,
    filter: Document,
    update: Document,
) -> Result<bool> {
    let res = collection
        .update_one(filter, doc! { "$set": update }, None)
        .await?;
    Ok(res.modified_count == 1)
}

pub async fn delete<E, D: MongoDocument<E>>(
    collection: &Collection<Document>,
    id: &ObjectId,
) -> Result<Option<E>> {
    match collection
        .find_one_and_delete(get_id_filter(id), None)
        .await?
    {
        Some(doc) => persistence_to_entity::<E, D>(doc).map(Some),
        None => Ok(None),
    }
}

async fn consume_cursor<E, D: MongoDocument<E>>(mut cursor: Cursor<Document>) -> Vec<E> {
    let mut documents = vec![];
    while let Some(result) = cursor.next().await {
        match result.map_err(anyhow::Error::new).and_then(persistence_to_entity::<E, D>) {
            Ok(entity) => documents.push(entity),
            Err(e) => {
                error!("Error reading document from cursor: {:?}", e);
            }
        }
    }

    documents
}
